//! Wire types for the search protocol.
//!
//! One request/response pair covers both endpoint configurations: the
//! Google Ads and SA360 search calls share body and paging semantics.

use serde::{Deserialize, Serialize};

use crate::rows::AdsRow;

/// Request body for a search call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Rows per page. The API caps this at 10,000.
    pub page_size: u32,
    /// The rendered AQL query.
    pub query: String,
    /// The customer ID being queried.
    pub customer_id: String,
    /// Continuation token from the previous page, absent on the first
    /// request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// Response body from a search call.
///
/// Both fields are optional on the wire; an empty page carries neither.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<AdsRow>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Per-request headers for the search endpoint.
#[derive(Debug, Clone)]
pub struct SearchHeaders {
    /// Developer token; omitted from the request when empty.
    pub developer_token: String,
    /// OAuth bearer token.
    pub bearer_token: String,
    /// Login customer ID authorizing access to the hierarchy.
    pub login_customer_id: String,
}
