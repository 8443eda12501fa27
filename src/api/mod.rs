//! Search API client.
//!
//! The only wire protocol in this layer: `POST
//! https://{host}/{version}/customers/{id}/{call}` with a JSON body of
//! `{pageSize, query, customerId, pageToken?}`. The [`SearchTransport`]
//! trait isolates that call; [`GoogleAdsClient`] layers customer-ID
//! validation and pagination on top, and [`GoogleAdsClientFactory`] hands
//! out one shared client per login customer ID.

mod client;
mod error;
mod factory;
mod transport;
mod wire;

pub use client::{GoogleAdsClient, PAGE_SIZE};
pub use error::{ApiError, ApiResult};
pub use factory::GoogleAdsClientFactory;
pub use transport::{HttpTransport, SearchTransport};
pub use wire::{SearchHeaders, SearchRequest, SearchResponse};
