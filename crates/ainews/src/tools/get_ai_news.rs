//! Tool for fetching AI-curated crypto and Web3 news

use ainews_core::Result as CoreResult;
use ainews_tools::Tool;
use async_trait::async_trait;
use chrono::Utc;
use futures::FutureExt;
use serde_json::{Value, json};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::config::AINewsConfig;
use crate::credential::{CredentialSource, EnvCredential, require_api_key};
use crate::envelope::ResultEnvelope;
use crate::error::{NewsError, Result};
use crate::provider::ClientProvider;
use crate::query::NewsQuery;
use crate::request::FilterRequest;
use crate::resolver::ResolvedFilters;

/// Name the tool is registered under
pub const TOOL_NAME: &str = "getAINews";

/// Tool for fetching filtered news from the ChainGPT AI News service
///
/// Every invocation produces an envelope; failures never escape as errors.
pub struct GetAINewsTool {
    credentials: Arc<dyn CredentialSource>,
    clients: ClientProvider,
}

impl GetAINewsTool {
    /// Create the tool reading the key from `config.api_key_env`
    pub fn new(config: Arc<AINewsConfig>) -> Self {
        let credentials = Arc::new(EnvCredential::new(config.api_key_env.clone()));
        Self::with_parts(credentials, ClientProvider::chaingpt(config))
    }

    /// Create the tool from explicit collaborators
    pub fn with_parts(credentials: Arc<dyn CredentialSource>, clients: ClientProvider) -> Self {
        Self {
            credentials,
            clients,
        }
    }

    /// Client handle shared across invocations
    pub fn clients(&self) -> &ClientProvider {
        &self.clients
    }

    /// Run one invocation and package the outcome
    pub async fn invoke(&self, params: Value) -> ResultEnvelope {
        match AssertUnwindSafe(self.run(params)).catch_unwind().await {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(error)) => {
                tracing::warn!(
                    error_type = ?error.category(),
                    "getAINews failed: {error}"
                );
                ResultEnvelope::failure(&error, Utc::now())
            }
            Err(panic) => {
                let error = NewsError::Unexpected(panic_message(panic.as_ref()));
                tracing::error!("getAINews panicked: {error}");
                ResultEnvelope::failure(&error, Utc::now())
            }
        }
    }

    async fn run(&self, params: Value) -> Result<ResultEnvelope> {
        let request = FilterRequest::from_params(params)?;

        let api_key = require_api_key(self.credentials.as_ref())?;
        let client = self.clients.get_or_init(&api_key).await?;

        let resolved = ResolvedFilters::resolve(&request);
        let query = NewsQuery::build(
            &request,
            &resolved.categories.ids,
            &resolved.networks.ids,
            &resolved.tokens.ids,
        )?;

        tracing::debug!(
            category_ids = ?resolved.categories.ids,
            sub_category_ids = ?resolved.networks.ids,
            token_ids = ?resolved.tokens.ids,
            limit = query.limit,
            offset = query.offset,
            "fetching news"
        );

        let response = client.fetch_news(&query).await?;
        tracing::info!(results = response.data.len(), "news fetched");

        Ok(ResultEnvelope::success(
            &request,
            &resolved,
            response,
            Utc::now(),
        ))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[async_trait]
impl Tool for GetAINewsTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        Ok(self.invoke(params).await.to_value())
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Fetch the latest AI-related crypto and Web3 news with optional filtering by \
         categories, blockchains, tokens, keywords, and date range"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "categories": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Categories to filter by (e.g., ['defi', 'nft', 'gaming', 'dao', 'metaverse'])"
                },
                "blockchains": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Blockchains/networks to filter by (e.g., ['ethereum', 'bitcoin', 'solana', 'polygon'])"
                },
                "tokens": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Tokens/cryptocurrencies to filter by (e.g., ['bitcoin', 'ethereum', 'usdt', 'bnb'])"
                },
                "searchQuery": {
                    "type": "string",
                    "description": "Keyword or phrase to search for in news titles and descriptions"
                },
                "fetchAfter": {
                    "type": "string",
                    "description": "Only return news published after this date (ISO 8601 format, e.g., '2024-01-01T00:00:00Z')"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 0,
                    "default": 10,
                    "description": "Number of news articles to return (default: 10)"
                },
                "offset": {
                    "type": "integer",
                    "minimum": 0,
                    "default": 0,
                    "description": "Number of items to skip for pagination (default: 0)"
                }
            }
        })
    }
}
