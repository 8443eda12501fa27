//! Configuration module for the launch monitor.
//!
//! Handles endpoint selection, environment variables, and settings.

mod endpoint;
mod settings;

pub use endpoint::{ApiEndpoint, EndpointError};
pub use settings::{expand_env_vars, AccountsSettings, ApiSettings, Settings, SettingsError};
