//! API-client error types.

use thiserror::Error;

use crate::auth::AuthError;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while querying the search endpoint.
///
/// There is no retry or backoff anywhere in this layer: configuration
/// errors are raised before any network I/O, and transport errors are fatal
/// to the in-progress query.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A customer-ID component was not a plain digit string.
    #[error("invalid customer ids: {0}")]
    InvalidCustomerIds(String),

    /// Multiple customer IDs were requested without a login customer ID.
    #[error("multiple customer ids require a login customer id")]
    MissingLoginCustomerId,

    /// Failed to obtain credentials.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// HTTP-level failure.
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-success status.
    #[error("search request returned status {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The response body was not valid JSON of the expected shape.
    #[error("failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}
