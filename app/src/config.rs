//! Runtime configuration read from the environment

use orderdesk_api::{ApiConfig, ApiError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Backend base URL
pub const BACKEND_VAR: &str = "ORDERDESK_API_BACKEND";
/// HTTP timeout in whole seconds
pub const TIMEOUT_VAR: &str = "ORDERDESK_HTTP_TIMEOUT_SECS";
/// Default tracing filter when `RUST_LOG` is unset
pub const LOG_LEVEL_VAR: &str = "ORDERDESK_LOG_LEVEL";

const DEFAULT_BACKEND: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Timeout is not a positive whole number of seconds
    #[error("{TIMEOUT_VAR} must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),

    /// Base URL was rejected by the API client
    #[error("{BACKEND_VAR} is invalid: {0}")]
    InvalidBackend(#[source] ApiError),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend base URL
    pub api_backend: String,
    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,
    /// Default log filter
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_backend: DEFAULT_BACKEND.to_string(),
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let http_timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => defaults.http_timeout_secs,
        };

        let config = Self {
            api_backend: lookup(BACKEND_VAR).unwrap_or(defaults.api_backend),
            http_timeout_secs,
            log_level: lookup(LOG_LEVEL_VAR).unwrap_or(defaults.log_level),
        };

        // Reject a bad URL at startup rather than on the first request
        config.api_config()?;
        Ok(config)
    }

    /// HTTP request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Client configuration for the API crate
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBackend`] if the base URL is not http(s).
    pub fn api_config(&self) -> Result<ApiConfig, ConfigError> {
        ApiConfig::new(&self.api_backend, self.timeout()).map_err(ConfigError::InvalidBackend)
    }
}
