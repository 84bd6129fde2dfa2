//! Command-line interface for ainews
//!
//! Runs one `getAINews` invocation and prints the JSON envelope to stdout.
//!
//! # Usage
//!
//! ```bash
//! export CHAINGPT_API_KEY=your_api_key
//! ainews --category defi --token eth --limit 5
//! ```

use ainews::{AINewsConfig, GetAINewsTool, tools::TOOL_NAME};
use ainews_tools::ToolRegistry;
use clap::Parser;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ainews")]
#[command(about = "Fetch AI-curated crypto and Web3 news from ChainGPT", long_about = None)]
struct Args {
    /// Category to filter by (repeatable), e.g. defi, nft, gaming
    #[arg(short, long = "category")]
    categories: Vec<String>,

    /// Blockchain/network to filter by (repeatable), e.g. ethereum, solana
    #[arg(short, long = "blockchain")]
    blockchains: Vec<String>,

    /// Token to filter by (repeatable), e.g. btc, usdt
    #[arg(short, long = "token")]
    tokens: Vec<String>,

    /// Keyword or phrase to search for
    #[arg(short, long)]
    search: Option<String>,

    /// Only return news published after this ISO 8601 date
    #[arg(long)]
    fetch_after: Option<String>,

    /// Number of articles to return
    #[arg(short, long)]
    limit: Option<u32>,

    /// Number of articles to skip
    #[arg(short, long)]
    offset: Option<u32>,

    /// Override the ChainGPT API base URL
    #[arg(long, env = "CHAINGPT_API_BASE")]
    api_base: Option<String>,

    /// Print the tool definitions instead of calling the tool
    #[arg(long)]
    list_tools: bool,
}

impl Args {
    /// Tool parameters; empty flags are left out so tool defaults apply
    fn params(&self) -> Value {
        let mut params = Map::new();

        for (key, terms) in [
            ("categories", &self.categories),
            ("blockchains", &self.blockchains),
            ("tokens", &self.tokens),
        ] {
            if !terms.is_empty() {
                params.insert(key.to_string(), json!(terms));
            }
        }

        if let Some(search) = &self.search {
            params.insert("searchQuery".to_string(), json!(search));
        }
        if let Some(after) = &self.fetch_after {
            params.insert("fetchAfter".to_string(), json!(after));
        }
        if let Some(limit) = self.limit {
            params.insert("limit".to_string(), json!(limit));
        }
        if let Some(offset) = self.offset {
            params.insert("offset".to_string(), json!(offset));
        }

        Value::Object(params)
    }

    fn config(&self) -> anyhow::Result<AINewsConfig> {
        let mut builder = AINewsConfig::builder();
        if let Some(base) = &self.api_base {
            builder = builder.api_base_url(base.trim());
        }
        Ok(builder.build()?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ainews_utils::Config::from_env();
    ainews_utils::init_tracing_with(&settings);

    let args = Args::parse();
    let config = Arc::new(args.config()?);

    let registry = ToolRegistry::new();
    registry.register(Arc::new(GetAINewsTool::new(Arc::clone(&config))));

    if args.list_tools {
        println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
        return Ok(());
    }

    info!(api_base = %config.api_base_url, "calling {TOOL_NAME}");

    let output = registry.call(TOOL_NAME, args.params()).await?;
    println!("{}", output.text());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_from_flags() {
        let args = Args::try_parse_from([
            "ainews",
            "--category",
            "defi",
            "-c",
            "nft",
            "--token",
            "btc",
            "--search",
            "etf",
            "--fetch-after",
            "2024-01-01",
            "--limit",
            "5",
        ])
        .unwrap();

        assert_eq!(
            args.params(),
            json!({
                "categories": ["defi", "nft"],
                "tokens": ["btc"],
                "searchQuery": "etf",
                "fetchAfter": "2024-01-01",
                "limit": 5
            })
        );
    }

    #[test]
    fn test_no_flags_is_empty_object() {
        let args = Args::try_parse_from(["ainews"]).unwrap();
        assert_eq!(args.params(), json!({}));
        assert!(!args.list_tools);
    }

    #[test]
    fn test_config_rejects_bad_api_base() {
        let args = Args::try_parse_from(["ainews", "--api-base", "not a url"]).unwrap();
        assert!(args.config().is_err());
    }

    #[test]
    fn test_negative_limit_is_rejected_by_parser() {
        assert!(Args::try_parse_from(["ainews", "--limit", "-3"]).is_err());
    }
}
