//! # Launch Monitor
//!
//! Report and query abstraction layer for an Ads launch monitor
//! (Google Ads / SA360).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │         ReportDefinition (output, query, transform)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [report factory: leaf expansion]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Report (definition + client + customer scope)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [fetch: two-pass join resolution]
//! ┌─────────────────────────────────────────────────────────┐
//! │       GoogleAdsClient (validation + AQL + pagination)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [SearchTransport]
//! ┌─────────────────────────────────────────────────────────┐
//! │    POST https://{host}/{version}/customers/{id}/{call}   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Execution is strictly sequential: pagination and multi-customer-ID
//! iteration issue one round-trip at a time, so rows always arrive in
//! customer-ID-then-page order. Shared state is limited to three
//! process-lifetime memoized caches (the OAuth token, one client per login
//! customer ID, and the leaf-to-root account map), consistent with a
//! single short-lived run.

pub mod accounts;
pub mod api;
pub mod auth;
pub mod config;
pub mod query;
pub mod report;
pub mod rows;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::accounts::AccountNode;
    pub use crate::api::{
        ApiError, ApiResult, GoogleAdsClient, GoogleAdsClientFactory, HttpTransport,
        SearchTransport,
    };
    pub use crate::auth::{AuthError, CredentialManager, TokenProvider};
    pub use crate::config::{ApiEndpoint, Settings};
    pub use crate::query::{Query, QueryError};
    pub use crate::report::{
        field, join_field, Record, Report, ReportDefinition, ReportError, ReportFactory,
        ReportResult, ResolvedJoins,
    };
    pub use crate::rows::{path_string, resolve_path, scalar_string, AdsRow};
}

// Also export the load-bearing types at crate root for convenience
pub use api::{GoogleAdsClient, GoogleAdsClientFactory};
pub use auth::CredentialManager;
pub use query::Query;
pub use report::{Report, ReportDefinition, ReportFactory};
