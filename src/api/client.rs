//! Paginated search client.
//!
//! [`GoogleAdsClient`] issues search requests per customer ID and yields
//! result rows lazily. The caller hands in a comma-joined customer-ID
//! specification; the client validates it before any network I/O, then
//! walks each ID in order, following `nextPageToken` until the server
//! omits it. Rows arrive in customer-ID order, then page order within
//! each ID - strictly sequential, one round-trip at a time.

use std::sync::Arc;

use async_stream::try_stream;
use futures::Stream;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{ApiError, ApiResult};
use super::transport::SearchTransport;
use super::wire::{SearchHeaders, SearchRequest};
use crate::auth::CredentialManager;
use crate::config::ApiEndpoint;
use crate::query::Query;
use crate::rows::AdsRow;

/// Rows per page. API-imposed ceiling.
pub const PAGE_SIZE: u32 = 10_000;

static CUSTOMER_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("customer id pattern"));

/// Async client for one login customer ID.
pub struct GoogleAdsClient {
    endpoint: ApiEndpoint,
    developer_token: String,
    login_customer_id: String,
    credentials: Arc<CredentialManager>,
    transport: Arc<dyn SearchTransport>,
}

impl GoogleAdsClient {
    pub fn new(
        endpoint: ApiEndpoint,
        developer_token: String,
        login_customer_id: String,
        credentials: Arc<CredentialManager>,
        transport: Arc<dyn SearchTransport>,
    ) -> Self {
        Self {
            endpoint,
            developer_token,
            login_customer_id,
            credentials,
            transport,
        }
    }

    /// The login customer ID this client authenticates as.
    pub fn login_customer_id(&self) -> &str {
        &self.login_customer_id
    }

    /// Split and validate a customer-ID specification.
    ///
    /// The spec is comma-joined; each component may carry a leading `"- "`
    /// marker (sheet list syntax), which is stripped. Any component that is
    /// not a plain digit string fails the whole call.
    fn parse_customer_ids(spec: &str) -> ApiResult<Vec<String>> {
        let mut ids = Vec::new();
        for component in spec.split(',') {
            let id = component.trim();
            let id = id.strip_prefix("- ").unwrap_or(id);
            if !CUSTOMER_ID.is_match(id) {
                return Err(ApiError::InvalidCustomerIds(spec.to_string()));
            }
            ids.push(id.to_string());
        }
        Ok(ids)
    }

    /// Run a query against one or more customer IDs, yielding rows lazily.
    ///
    /// Validation happens before any network I/O. Transport failures abort
    /// the stream; there is no retry.
    ///
    /// # Errors
    ///
    /// Fails synchronously on a malformed customer-ID specification, or on
    /// multiple IDs without a login customer ID.
    pub fn search<'a>(
        &'a self,
        customer_ids: &str,
        query: &Query,
        extra_wheres: &[String],
    ) -> ApiResult<impl Stream<Item = ApiResult<AdsRow>> + 'a> {
        let ids = Self::parse_customer_ids(customer_ids)?;
        if ids.len() > 1 && self.login_customer_id.is_empty() {
            return Err(ApiError::MissingLoginCustomerId);
        }
        let aql = query.qlify(extra_wheres);

        Ok(try_stream! {
            let token = self.credentials.token().await?;
            let headers = SearchHeaders {
                developer_token: self.developer_token.clone(),
                bearer_token: token.to_string(),
                login_customer_id: self.login_customer_id.clone(),
            };

            for id in ids {
                let url = self.endpoint.search_url(&id);
                let mut page_token: Option<String> = None;
                loop {
                    let request = SearchRequest {
                        page_size: PAGE_SIZE,
                        query: aql.clone(),
                        customer_id: id.clone(),
                        page_token: page_token.take(),
                    };
                    let response = self.transport.search(&url, &headers, &request).await?;
                    debug!(
                        "search customer={} rows={} more={}",
                        id,
                        response.results.len(),
                        response.next_page_token.is_some()
                    );

                    for row in response.results {
                        yield row;
                    }

                    match response.next_page_token {
                        Some(next) => page_token = Some(next),
                        None => break,
                    }
                }
            }
        })
    }

    /// Run a query against a single customer ID.
    pub fn search_one<'a>(
        &'a self,
        customer_id: &str,
        query: &Query,
        extra_wheres: &[String],
    ) -> ApiResult<impl Stream<Item = ApiResult<AdsRow>> + 'a> {
        self.search(customer_id, query, extra_wheres)
    }
}
