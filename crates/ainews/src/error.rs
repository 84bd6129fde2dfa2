//! Error types for news operations

use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::api::{FetchError, FetchErrorKind};

/// Errors raised while serving a news request
#[derive(Debug, Error)]
pub enum NewsError {
    /// No API key configured
    #[error("ChainGPT API key not found. Please set the {var} environment variable.")]
    MissingCredential {
        /// Variable the key is read from
        var: String,
    },

    /// `fetchAfter` could not be parsed as an ISO-8601 instant
    #[error(
        "Invalid date format for fetchAfter. Please use ISO 8601 format (e.g., '2024-01-01T00:00:00Z')"
    )]
    InvalidDate {
        /// The string the caller supplied
        provided: String,
    },

    /// Parameters did not match the tool's input schema
    #[error("Invalid parameters: {0}")]
    InvalidRequest(String),

    /// The news service failed
    #[error("Failed to fetch AI news: {0}")]
    RemoteFetch(#[from] FetchError),

    /// Any other fault caught at the invocation boundary
    #[error("Failed to fetch AI news: {0}")]
    Unexpected(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for news operations
pub type Result<T> = std::result::Result<T, NewsError>;

/// Machine-readable failure category reported as `errorType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureCategory {
    MissingCredential,
    InvalidDate,
    InvalidRequest,
    RemoteFetchFailure,
    UnexpectedFailure,
}

impl NewsError {
    /// Category reported to the caller
    pub fn category(&self) -> FailureCategory {
        match self {
            NewsError::MissingCredential { .. } => FailureCategory::MissingCredential,
            NewsError::InvalidDate { .. } => FailureCategory::InvalidDate,
            NewsError::InvalidRequest(_) => FailureCategory::InvalidRequest,
            NewsError::RemoteFetch(_) => FailureCategory::RemoteFetchFailure,
            NewsError::Unexpected(_) | NewsError::ConfigError(_) => {
                FailureCategory::UnexpectedFailure
            }
        }
    }

    /// Extra fields merged into the error envelope
    pub fn context(&self) -> Map<String, Value> {
        let mut context = Map::new();
        match self {
            NewsError::MissingCredential { var } => {
                context.insert(
                    "suggestion".to_string(),
                    json!(format!("Add {var}=your_api_key to your environment variables")),
                );
            }
            NewsError::InvalidDate { provided } => {
                context.insert("providedDate".to_string(), json!(provided));
            }
            NewsError::RemoteFetch(err) => {
                context.insert("remoteErrorKind".to_string(), json!(err.kind.label()));
                if let FetchErrorKind::HttpStatus(status) = err.kind {
                    context.insert("httpStatus".to_string(), json!(status));
                }
            }
            NewsError::InvalidRequest(_) | NewsError::Unexpected(_) | NewsError::ConfigError(_) => {}
        }
        context
    }
}

/// Convert NewsError to ainews_core::Error
impl From<NewsError> for ainews_core::Error {
    fn from(err: NewsError) -> Self {
        ainews_core::Error::ProcessingFailed(err.to_string())
    }
}
