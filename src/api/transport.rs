//! Transport seam for the search endpoint.
//!
//! [`SearchTransport`] abstracts the single HTTP call this layer makes, so
//! the client logic (validation, pagination, joins) is testable against a
//! scripted mock without touching the network.

use async_trait::async_trait;

use super::error::{ApiError, ApiResult};
use super::wire::{SearchHeaders, SearchRequest, SearchResponse};

/// One search round-trip.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// POST the request to the given URL and decode the response.
    async fn search(
        &self,
        url: &str,
        headers: &SearchHeaders,
        request: &SearchRequest,
    ) -> ApiResult<SearchResponse>;
}

/// HTTP transport over reqwest.
#[derive(Debug, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn search(
        &self,
        url: &str,
        headers: &SearchHeaders,
        request: &SearchRequest,
    ) -> ApiResult<SearchResponse> {
        let mut builder = self
            .http
            .post(url)
            .bearer_auth(&headers.bearer_token)
            .header("login-customer-id", &headers.login_customer_id);

        if !headers.developer_token.is_empty() {
            builder = builder.header("developer-token", &headers.developer_token);
        }

        let response = builder.json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json().await?)
    }
}
