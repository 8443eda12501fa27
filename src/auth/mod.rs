//! OAuth credential management.
//!
//! [`CredentialManager`] obtains a bearer token from a [`TokenProvider`] on
//! first use and caches it for its own lifetime. There is no expiry
//! handling: the manager is scoped to a single run, and tokens outlive any
//! one fetch.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

/// Result type for credential operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while obtaining credentials.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// The underlying OAuth provider failed.
    #[error("failed to obtain oauth token: {0}")]
    TokenFetch(String),
}

/// Source of OAuth bearer tokens.
///
/// The production implementation wraps whatever identity facility hosts the
/// process; tests supply a counting stub.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Fetch a fresh bearer token.
    async fn oauth_token(&self) -> AuthResult<String>;
}

/// Caches one bearer token for the lifetime of the manager.
pub struct CredentialManager {
    provider: Arc<dyn TokenProvider>,
    token: OnceCell<String>,
}

impl CredentialManager {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            provider,
            token: OnceCell::new(),
        }
    }

    /// The bearer token, fetching it on first call.
    ///
    /// Subsequent calls return the cached value; the provider is consulted
    /// at most once per manager. Provider failures are not cached, so a
    /// later call retries.
    pub async fn token(&self) -> AuthResult<&str> {
        self.token
            .get_or_try_init(|| self.provider.oauth_token())
            .await
            .map(String::as_str)
    }
}
