//! Process-wide news client handle
//!
//! The client is built on first use and then shared by every invocation;
//! it is never rebuilt while the provider lives.

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::api::{ChainGptClient, NewsFetcher};
use crate::config::AINewsConfig;
use crate::error::Result;

/// Builds a client from an API key
pub type ClientFactory = Arc<dyn Fn(&str) -> Result<Arc<dyn NewsFetcher>> + Send + Sync>;

/// Memoized factory for the news client
pub struct ClientProvider {
    client: OnceCell<Arc<dyn NewsFetcher>>,
    factory: ClientFactory,
}

impl ClientProvider {
    /// Create a provider around `factory`
    pub fn new(factory: ClientFactory) -> Self {
        Self {
            client: OnceCell::new(),
            factory,
        }
    }

    /// Provider building [`ChainGptClient`]s from `config`
    pub fn chaingpt(config: Arc<AINewsConfig>) -> Self {
        Self::new(Arc::new(move |api_key: &str| -> Result<Arc<dyn NewsFetcher>> {
            let client = ChainGptClient::new(api_key, &config)?;
            Ok(Arc::new(client) as Arc<dyn NewsFetcher>)
        }))
    }

    /// Provider that always hands out `client`
    pub fn fixed(client: Arc<dyn NewsFetcher>) -> Self {
        Self::new(Arc::new(move |_: &str| -> Result<Arc<dyn NewsFetcher>> {
            Ok(Arc::clone(&client))
        }))
    }

    /// Return the client, building it with `api_key` if none exists yet
    ///
    /// Concurrent first calls wait on a single construction. A failed
    /// construction leaves the slot empty.
    pub async fn get_or_init(&self, api_key: &str) -> Result<Arc<dyn NewsFetcher>> {
        let client = self
            .client
            .get_or_try_init(|| async {
                tracing::debug!("constructing news client");
                (self.factory)(api_key)
            })
            .await?;

        Ok(Arc::clone(client))
    }

    /// Whether a client has been built
    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockNewsFetcher;
    use crate::error::NewsError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_provider(builds: Arc<AtomicUsize>) -> ClientProvider {
        ClientProvider::new(Arc::new(move |_: &str| -> Result<Arc<dyn NewsFetcher>> {
            builds.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(MockNewsFetcher::new()) as Arc<dyn NewsFetcher>)
        }))
    }

    #[tokio::test]
    async fn test_builds_once_and_reuses() {
        let builds = Arc::new(AtomicUsize::new(0));
        let provider = counting_provider(Arc::clone(&builds));
        assert!(!provider.is_initialized());

        let first = provider.get_or_init("key-1").await.unwrap();
        let second = provider.get_or_init("key-2").await.unwrap();

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(provider.is_initialized());
    }

    #[tokio::test]
    async fn test_concurrent_first_use_builds_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let provider = Arc::new(counting_provider(Arc::clone(&builds)));

        let (a, b) = tokio::join!(provider.get_or_init("k"), provider.get_or_init("k"));

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_construction_can_be_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let provider = ClientProvider::new(Arc::new(move |_: &str| -> Result<Arc<dyn NewsFetcher>> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(NewsError::ConfigError("first attempt fails".into()))
            } else {
                Ok(Arc::new(MockNewsFetcher::new()) as Arc<dyn NewsFetcher>)
            }
        }));

        assert!(provider.get_or_init("k").await.is_err());
        assert!(!provider.is_initialized());
        assert!(provider.get_or_init("k").await.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_chaingpt_provider_builds_real_client() {
        let provider = ClientProvider::chaingpt(Arc::new(AINewsConfig::default()));
        assert!(provider.get_or_init("key").await.is_ok());
    }
}
