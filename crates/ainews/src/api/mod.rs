//! News service collaborator
//!
//! Business logic only sees [`NewsFetcher`]; [`ChainGptClient`] is the HTTP
//! implementation used in production.

pub mod chaingpt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::query::NewsQuery;

pub use chaingpt::ChainGptClient;

/// Response of the news service; items are passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsResponse {
    pub data: Vec<Value>,
}

/// Failure kind reported by a [`NewsFetcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Request could not be built locally
    Request,
    /// Connection, TLS or timeout failure
    Transport,
    /// Non-success HTTP status
    HttpStatus(u16),
    /// Response body could not be decoded
    Decode,
    /// Service reported an error in a successful response
    Api,
}

impl FetchErrorKind {
    /// Label placed into error envelopes
    pub fn label(self) -> &'static str {
        match self {
            FetchErrorKind::Request => "RequestError",
            FetchErrorKind::Transport => "TransportError",
            FetchErrorKind::HttpStatus(_) => "HttpStatusError",
            FetchErrorKind::Decode => "DecodeError",
            FetchErrorKind::Api => "ApiError",
        }
    }
}

/// Error raised by the news service collaborator
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Remote news retrieval
///
/// Implementations make exactly one attempt per call; timeouts and rate
/// limiting are their own concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsFetcher: Send + Sync {
    /// Fetch one page of news matching `query`
    async fn fetch_news(&self, query: &NewsQuery) -> Result<NewsResponse, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_tolerates_extra_fields() {
        let response: NewsResponse = serde_json::from_value(json!({
            "statusCode": 200,
            "message": "Request Successful",
            "data": [{"id": 1}, {"id": 2}]
        }))
        .unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0]["id"], 1);
    }

    #[test]
    fn test_response_without_data_is_rejected() {
        let result = serde_json::from_value::<NewsResponse>(json!({
            "statusCode": 401,
            "message": "Invalid API key"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(FetchErrorKind::Request.label(), "RequestError");
        assert_eq!(FetchErrorKind::Transport.label(), "TransportError");
        assert_eq!(FetchErrorKind::HttpStatus(500).label(), "HttpStatusError");
        assert_eq!(FetchErrorKind::Decode.label(), "DecodeError");
        assert_eq!(FetchErrorKind::Api.label(), "ApiError");
        assert_eq!(
            FetchError::new(FetchErrorKind::Api, "quota exceeded").to_string(),
            "quota exceeded"
        );
    }
}
