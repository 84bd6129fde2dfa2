//! Configuration for the news tool

use crate::error::{NewsError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default ChainGPT API base URL
pub const DEFAULT_API_BASE: &str = "https://api.chaingpt.org";

/// Environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "CHAINGPT_API_KEY";

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "CHAINGPT_API_BASE";

/// Configuration for news operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AINewsConfig {
    /// Base URL of the news service
    pub api_base_url: String,

    /// Environment variable the API key is read from on every call
    pub api_key_env: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Requests per minute allowed against the news service
    pub rate_limit: u32,
}

impl Default for AINewsConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            request_timeout: Duration::from_secs(30),
            rate_limit: 60,
        }
    }
}

impl AINewsConfig {
    /// Create a new configuration builder
    pub fn builder() -> AINewsConfigBuilder {
        AINewsConfigBuilder::default()
    }

    /// Apply the `CHAINGPT_API_BASE` override from the environment
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                self.api_base_url = base.trim().to_string();
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            NewsError::ConfigError(format!(
                "api_base_url '{}' is not a valid URL: {e}",
                self.api_base_url
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(NewsError::ConfigError(format!(
                "api_base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.api_key_env.trim().is_empty() {
            return Err(NewsError::ConfigError(
                "api_key_env must not be empty".to_string(),
            ));
        }

        if self.rate_limit == 0 {
            return Err(NewsError::ConfigError(
                "rate_limit must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(NewsError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for AINewsConfig
#[derive(Debug, Default)]
pub struct AINewsConfigBuilder {
    api_base_url: Option<String>,
    api_key_env: Option<String>,
    request_timeout: Option<Duration>,
    rate_limit: Option<u32>,
}

impl AINewsConfigBuilder {
    /// Set the API base URL
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the environment variable the API key is read from
    pub fn api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = Some(var.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set requests per minute
    pub fn rate_limit(mut self, per_minute: u32) -> Self {
        self.rate_limit = Some(per_minute);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AINewsConfig> {
        let defaults = AINewsConfig::default();

        let config = AINewsConfig {
            api_base_url: self.api_base_url.unwrap_or(defaults.api_base_url),
            api_key_env: self.api_key_env.unwrap_or(defaults.api_key_env),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            rate_limit: self.rate_limit.unwrap_or(defaults.rate_limit),
        };

        config.validate()?;
        Ok(config)
    }
}
