//! TOML-based configuration for the launch monitor.
//!
//! Supports a config file (launch-monitor.toml) with environment variable
//! expansion for secrets.
//!
//! Example configuration:
//! ```toml
//! [api]
//! endpoint = "google_ads"
//! developer_token = "${ADS_DEVELOPER_TOKEN}"
//! login_customer_id = "1234567890"
//! customer_ids = "1111111111,2222222222"
//!
//! [[accounts.roots]]
//! customer_id = "1111111111"
//! expand = true
//!
//! [[accounts.roots]]
//! customer_id = "2222222222"
//! children = [{ customer_id = "3333333333" }]
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::endpoint::{ApiEndpoint, EndpointError};
use crate::accounts::AccountNode;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Search API configuration.
    pub api: ApiSettings,

    /// Account hierarchy configuration.
    pub accounts: AccountsSettings,
}

/// Search API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Endpoint preset name (google_ads, sa360).
    pub endpoint: String,

    /// Developer token (supports ${ENV_VAR} expansion). May be empty for
    /// endpoints that do not require one.
    pub developer_token: String,

    /// Login customer ID used in API headers. Required when more than one
    /// customer ID is queried.
    pub login_customer_id: String,

    /// Comma-separated top-level customer IDs to report against.
    pub customer_ids: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: "google_ads".to_string(),
            developer_token: String::new(),
            login_customer_id: String::new(),
            customer_ids: String::new(),
        }
    }
}

impl ApiSettings {
    /// Resolve the endpoint preset.
    pub fn endpoint(&self) -> Result<ApiEndpoint, SettingsError> {
        Ok(ApiEndpoint::from_name(&self.endpoint)?)
    }

    /// Get the developer token with environment variables expanded.
    pub fn resolved_developer_token(&self) -> Result<String, SettingsError> {
        expand_env_vars(&self.developer_token)
    }
}

/// Account hierarchy configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AccountsSettings {
    /// Top-level account nodes for the legacy account-map resolver.
    pub roots: Vec<AccountNode>,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `LAUNCH_MONITOR_CONFIG`
    /// 2. `./launch-monitor.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("LAUNCH_MONITOR_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("launch-monitor.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' {
            // Check for ${VAR} or $VAR
            if chars.peek() == Some(&'{') {
                chars.next(); // consume '{'
                let mut var_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(ch);
                    chars.next();
                }
                let value = env::var(&var_name)
                    .map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
                result.push_str(&value);
            } else {
                // $VAR (ends at non-alphanumeric/underscore)
                let mut var_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        var_name.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if var_name.is_empty() {
                    // Just a lone $, keep it
                    result.push('$');
                } else {
                    let value = env::var(&var_name)
                        .map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
                    result.push_str(&value);
                }
            }
        } else {
            result.push(c);
        }
    }

    Ok(result)
}
