//! Search endpoint descriptors.
//!
//! Two hosted query APIs speak the same search protocol: Google Ads and
//! SA360. An [`ApiEndpoint`] carries the host, API version, and search call
//! path that differ between them.

/// Error type for endpoint selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("unsupported endpoint: {0}. Supported: google_ads, sa360")]
    Unsupported(String),
}

/// A search API endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    /// API hostname.
    pub host: String,
    /// API version path segment.
    pub version: String,
    /// Search method path segment (e.g. `googleAds:search`).
    pub search_call: String,
}

impl ApiEndpoint {
    /// The Google Ads API endpoint.
    pub fn google_ads() -> Self {
        Self {
            host: "googleads.googleapis.com".to_string(),
            version: "v11".to_string(),
            search_call: "googleAds:search".to_string(),
        }
    }

    /// The SA360 API endpoint.
    pub fn sa360() -> Self {
        Self {
            host: "searchads360.googleapis.com".to_string(),
            version: "v0".to_string(),
            search_call: "searchAds360:search".to_string(),
        }
    }

    /// Look up an endpoint preset by name.
    pub fn from_name(name: &str) -> Result<Self, EndpointError> {
        match name.to_lowercase().as_str() {
            "google_ads" | "googleads" | "ads" => Ok(Self::google_ads()),
            "sa360" | "search_ads_360" | "searchads360" => Ok(Self::sa360()),
            other => Err(EndpointError::Unsupported(other.to_string())),
        }
    }

    /// The full search URL for a customer ID.
    pub fn search_url(&self, customer_id: &str) -> String {
        format!(
            "https://{}/{}/customers/{}/{}",
            self.host, self.version, customer_id, self.search_call
        )
    }
}
