//! ChainGPT AI News API client

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::Arc;
use url::Url;

use super::{FetchError, FetchErrorKind, NewsFetcher, NewsResponse};
use crate::config::AINewsConfig;
use crate::error::{NewsError, Result};
use crate::query::NewsQuery;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Client for the ChainGPT news endpoint
pub struct ChainGptClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    rate_limiter: SharedRateLimiter,
}

impl ChainGptClient {
    /// Create a new client with rate limiting and a request timeout from `config`
    ///
    /// # Arguments
    /// * `api_key` - ChainGPT API key, sent as a bearer token
    /// * `config` - Base URL, timeout and requests-per-minute budget
    pub fn new(api_key: impl Into<String>, config: &AINewsConfig) -> Result<Self> {
        let endpoint = news_endpoint(&config.api_base_url)?;

        let rate = NonZeroU32::new(config.rate_limit)
            .ok_or_else(|| NewsError::ConfigError("rate_limit must be greater than 0".into()))?;
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(rate)));

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NewsError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint,
            rate_limiter,
        })
    }

    /// URL of the news endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the HTTP request for `query` without sending it
    pub fn build_request(&self, query: &NewsQuery) -> reqwest::Result<reqwest::Request> {
        self.client
            .get(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .query(&query.query_pairs())
            .build()
    }
}

/// Resolve `{base}/news`, keeping any path prefix on the base URL
fn news_endpoint(base: &str) -> Result<Url> {
    let mut base = Url::parse(base)
        .map_err(|e| NewsError::ConfigError(format!("Invalid API base URL '{base}': {e}")))?;

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join("news")
        .map_err(|e| NewsError::ConfigError(format!("Invalid API base URL: {e}")))
}

#[async_trait]
impl NewsFetcher for ChainGptClient {
    async fn fetch_news(&self, query: &NewsQuery) -> std::result::Result<NewsResponse, FetchError> {
        self.rate_limiter.until_ready().await;

        let request = self.build_request(query).map_err(|e| {
            FetchError::new(FetchErrorKind::Request, format!("Invalid request: {e}"))
        })?;

        tracing::debug!(url = %request.url(), "requesting ChainGPT news");

        let response = self.client.execute(request).await.map_err(|e| {
            FetchError::new(
                FetchErrorKind::Transport,
                format!("ChainGPT request failed: {e}"),
            )
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::new(
                FetchErrorKind::HttpStatus(status.as_u16()),
                format!("ChainGPT API error {status}: {body}"),
            ));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            FetchError::new(
                FetchErrorKind::Decode,
                format!("Failed to parse ChainGPT response: {e}"),
            )
        })?;

        if !body.get("data").is_some_and(serde_json::Value::is_array) {
            return Err(FetchError::new(
                FetchErrorKind::Api,
                body.get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("ChainGPT response has no news list")
                    .to_string(),
            ));
        }

        serde_json::from_value(body).map_err(|e| {
            FetchError::new(
                FetchErrorKind::Decode,
                format!("Failed to parse ChainGPT response: {e}"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FilterRequest;
    use crate::vocabulary::TaxonomyId;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}")
    }

    fn local_client(base: &str) -> ChainGptClient {
        let mut client = ChainGptClient::new("test_key", &config(base)).unwrap();
        client.client = Client::builder().no_proxy().build().unwrap();
        client
    }

    fn default_query() -> NewsQuery {
        NewsQuery::build(&FilterRequest::default(), &[], &[], &[]).unwrap()
    }

    fn config(base: &str) -> AINewsConfig {
        AINewsConfig {
            api_base_url: base.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let client = ChainGptClient::new("test_key", &AINewsConfig::default()).unwrap();
        assert_eq!(client.api_key, "test_key");
        assert_eq!(client.endpoint().as_str(), "https://api.chaingpt.org/news");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ChainGptClient::new("k", &config("http://localhost:8080/v2")).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:8080/v2/news");

        let client = ChainGptClient::new("k", &config("http://localhost:8080/v2/")).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:8080/v2/news");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ChainGptClient::new("k", &config("not a url"));
        assert!(matches!(result, Err(NewsError::ConfigError(_))));
    }

    #[test]
    fn test_zero_rate_limit_is_rejected() {
        let config = AINewsConfig {
            rate_limit: 0,
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        };
        assert!(matches!(
            ChainGptClient::new("k", &config),
            Err(NewsError::ConfigError(_))
        ));
    }

    #[test]
    fn test_build_request() {
        let client = ChainGptClient::new("secret", &AINewsConfig::default()).unwrap();
        let request = FilterRequest {
            search_query: Some("layer 2".to_string()),
            limit: Some(3),
            ..Default::default()
        };
        let query =
            NewsQuery::build(&request, &[TaxonomyId(5), TaxonomyId(8)], &[], &[]).unwrap();

        let http = client.build_request(&query).unwrap();

        assert_eq!(http.method(), reqwest::Method::GET);
        assert_eq!(
            http.headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer secret")
        );

        let pairs: Vec<(String, String)> = http
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("limit".to_string(), "3".to_string())));
        assert!(pairs.contains(&("sortBy".to_string(), "createdAt".to_string())));
        assert!(pairs.contains(&("categoryId".to_string(), "5".to_string())));
        assert!(pairs.contains(&("categoryId".to_string(), "8".to_string())));
        assert!(pairs.contains(&("searchQuery".to_string(), "layer 2".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "tokenId"));
    }

    #[tokio::test]
    async fn test_fetch_news_returns_items() {
        let base = serve_once(
            "200 OK",
            r#"{"statusCode":200,"message":"Request Successful","data":[{"id":1},{"id":2}]}"#,
        )
        .await;

        let response = local_client(&base).fetch_news(&default_query()).await.unwrap();

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[1]["id"], 2);
    }

    #[tokio::test]
    async fn test_fetch_news_without_data_is_api_error() {
        let base = serve_once("200 OK", r#"{"statusCode":401,"message":"Invalid API key"}"#).await;

        let err = local_client(&base)
            .fetch_news(&default_query())
            .await
            .unwrap_err();

        assert_eq!(err.kind, FetchErrorKind::Api);
        assert_eq!(err.message, "Invalid API key");
    }

    #[tokio::test]
    async fn test_fetch_news_non_list_data_is_api_error() {
        let base = serve_once("200 OK", r#"{"data":{"items":[]}}"#).await;

        let err = local_client(&base)
            .fetch_news(&default_query())
            .await
            .unwrap_err();

        assert_eq!(err.kind, FetchErrorKind::Api);
        assert_eq!(err.message, "ChainGPT response has no news list");
    }

    #[tokio::test]
    async fn test_fetch_news_http_status_error() {
        let base = serve_once("503 Service Unavailable", r#"{"message":"down"}"#).await;

        let err = local_client(&base)
            .fetch_news(&default_query())
            .await
            .unwrap_err();

        assert_eq!(err.kind, FetchErrorKind::HttpStatus(503));
        assert!(err.message.contains("503"));
        assert!(err.message.contains("down"));
    }

    #[tokio::test]
    async fn test_fetch_news_malformed_body_is_decode_error() {
        let base = serve_once("200 OK", "not json").await;

        let err = local_client(&base)
            .fetch_news(&default_query())
            .await
            .unwrap_err();

        assert_eq!(err.kind, FetchErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_unbuildable_request_is_request_error() {
        let client = ChainGptClient::new("bad\nkey", &AINewsConfig::default()).unwrap();

        let err = client.fetch_news(&default_query()).await.unwrap_err();

        assert_eq!(err.kind, FetchErrorKind::Request);
        assert!(err.message.starts_with("Invalid request"));
    }
}
