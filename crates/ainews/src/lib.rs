//! AI news tool for agent frameworks
//!
//! This crate exposes a single tool, `getAINews`, that lets an agent query the
//! ChainGPT AI News service with free-text filters. It includes:
//!
//! - Closed vocabularies mapping category, blockchain and token names to
//!   taxonomy ids
//! - Lenient term resolution (unknown terms are dropped, aliases collapse)
//! - Query construction with strict `fetchAfter` date parsing
//! - A uniform `status`-tagged envelope for results and failures
//! - A credential gate and a lazily-built, shared HTTP client
//!
//! # Example
//!
//! ```rust,no_run
//! use ainews::{AINewsConfig, GetAINewsTool};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(AINewsConfig::default().with_env()?);
//!     let tool = GetAINewsTool::new(config);
//!
//!     let envelope = tool
//!         .invoke(json!({ "categories": ["defi"], "tokens": ["eth"], "limit": 5 }))
//!         .await;
//!     println!("{}", envelope.to_text());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod credential;
pub mod envelope;
pub mod error;
pub mod provider;
pub mod query;
pub mod request;
pub mod resolver;
pub mod tools;
pub mod vocabulary;

// Re-export main types for convenience
pub use api::{ChainGptClient, FetchError, FetchErrorKind, NewsFetcher, NewsResponse};
pub use config::AINewsConfig;
pub use credential::{CredentialSource, EnvCredential, StaticCredential};
pub use envelope::ResultEnvelope;
pub use error::{FailureCategory, NewsError, Result};
pub use provider::ClientProvider;
pub use query::NewsQuery;
pub use request::FilterRequest;
pub use resolver::{ResolvedFilters, resolve};
pub use tools::GetAINewsTool;
pub use vocabulary::{Dimension, TaxonomyId, VocabularyTable};
