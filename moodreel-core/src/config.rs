//! Centralized configuration for Moodreel.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use url::Url;

use crate::mode::RuntimeMode;
use crate::{MoodreelError, Result};

/// Environment variable holding the catalog credential.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Central configuration for all Moodreel components.
#[derive(Debug, Clone, Default)]
pub struct MoodreelConfig {
    pub catalog: CatalogConfig,
    pub web: WebConfig,
}

/// Remote catalog (OMDb) configuration.
///
/// The API key is a secret. It is only ever attached to outgoing catalog
/// requests and must never be rendered back to clients.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog search endpoint
    pub base_url: String,
    /// Catalog credential, read from the environment
    pub api_key: Option<String>,
    /// Timeout for a single catalog request
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.omdbapi.com/".to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(10),
            user_agent: "moodreel/0.1.0",
        }
    }
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Web UI server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// How often a loading results fragment polls for settlement
    pub poll_interval: Duration,
    /// Browser sessions unused for this long are dropped
    pub session_idle_timeout: Duration,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            poll_interval: Duration::from_millis(500),
            session_idle_timeout: Duration::from_secs(30 * 60),
        }
    }
}

impl WebConfig {
    /// Socket address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MoodreelConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Only the catalog credential is read from the environment; an empty
    /// value counts as unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            let api_key = api_key.trim();
            if !api_key.is_empty() {
                config.catalog.api_key = Some(api_key.to_string());
            }
        }

        config
    }

    /// Checks that the configuration can serve the given runtime mode.
    ///
    /// # Errors
    ///
    /// - `MoodreelError::Configuration` - Catalog URL is malformed, or no API
    ///   key is available in production mode
    pub fn validate(&self, mode: RuntimeMode) -> Result<()> {
        Url::parse(&self.catalog.base_url).map_err(|e| MoodreelError::Configuration {
            reason: format!("invalid catalog URL '{}': {e}", self.catalog.base_url),
        })?;

        if mode.is_production() && self.catalog.api_key.is_none() {
            return Err(MoodreelError::Configuration {
                reason: format!("{API_KEY_ENV} is not set"),
            });
        }

        Ok(())
    }
}
