//! Client factory.
//!
//! Guarantees at most one [`GoogleAdsClient`] per distinct login customer
//! ID for the factory's lifetime. A new factory starts with an empty cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::client::GoogleAdsClient;
use super::transport::SearchTransport;
use crate::auth::CredentialManager;
use crate::config::ApiEndpoint;

/// Caches one client per login customer ID.
pub struct GoogleAdsClientFactory {
    endpoint: ApiEndpoint,
    developer_token: String,
    credentials: Arc<CredentialManager>,
    transport: Arc<dyn SearchTransport>,
    clients: Mutex<HashMap<String, Arc<GoogleAdsClient>>>,
}

impl GoogleAdsClientFactory {
    pub fn new(
        endpoint: ApiEndpoint,
        developer_token: String,
        credentials: Arc<CredentialManager>,
        transport: Arc<dyn SearchTransport>,
    ) -> Self {
        Self {
            endpoint,
            developer_token,
            credentials,
            transport,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Get the client for a login customer ID, constructing it on first
    /// request. Repeated calls with the same ID return the same instance.
    pub fn create(&self, login_customer_id: &str) -> Arc<GoogleAdsClient> {
        let mut clients = self.clients.lock().expect("client cache poisoned");
        clients
            .entry(login_customer_id.to_string())
            .or_insert_with(|| {
                Arc::new(GoogleAdsClient::new(
                    self.endpoint.clone(),
                    self.developer_token.clone(),
                    login_customer_id.to_string(),
                    Arc::clone(&self.credentials),
                    Arc::clone(&self.transport),
                ))
            })
            .clone()
    }
}
