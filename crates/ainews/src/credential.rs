//! Credential gate
//!
//! The key is read on every invocation, even after the client is cached.

use crate::error::{NewsError, Result};

/// Source of the news service API key
pub trait CredentialSource: Send + Sync {
    /// Current key, if one is configured
    fn api_key(&self) -> Option<String>;

    /// Where the key is expected to come from, used in error messages
    fn origin(&self) -> &str;
}

/// Reads the key from an environment variable
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvCredential {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }

    fn origin(&self) -> &str {
        &self.var
    }
}

/// Fixed key, for embedding and tests
#[derive(Debug, Clone)]
pub struct StaticCredential {
    key: Option<String>,
    origin: String,
}

impl StaticCredential {
    pub fn new(key: Option<String>) -> Self {
        Self {
            key,
            origin: crate::config::DEFAULT_API_KEY_ENV.to_string(),
        }
    }

    /// Shorthand for a configured key
    pub fn present(key: impl Into<String>) -> Self {
        Self::new(Some(key.into()))
    }

    /// Shorthand for a missing key
    pub fn missing() -> Self {
        Self::new(None)
    }
}

impl CredentialSource for StaticCredential {
    fn api_key(&self) -> Option<String> {
        self.key.clone()
    }

    fn origin(&self) -> &str {
        &self.origin
    }
}

/// Return the configured key, or `MissingCredential` if it is absent or blank
pub fn require_api_key(source: &dyn CredentialSource) -> Result<String> {
    source
        .api_key()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| NewsError::MissingCredential {
            var: source.origin().to_string(),
        })
}
