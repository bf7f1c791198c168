//! Cache Warmup
//!
//! Pre-loads hot keys concurrently after start-up.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::cache::{Priority, SetOptions};
use crate::service::Cache;

/// Outcome of a [`Cache::warmup`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmupSummary {
    pub loaded: usize,
    pub failed: usize,
}

impl<V> Cache<V>
where
    V: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    // == Warmup ==
    /// Fetches every key concurrently and stores the results with high priority
    /// and the configured warmup TTL.
    ///
    /// Best effort: a failing key is logged and skipped. Returns once every
    /// fetch has finished.
    pub async fn warmup<I, K, F, Fut, E>(&self, keys: I, fetcher: F) -> WarmupSummary
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let ttl = self.store.read().await.config().warmup_ttl;
        let fetcher = Arc::new(fetcher);
        let mut tasks = JoinSet::new();

        for key in keys {
            let key: String = key.into();
            let cache = self.clone();
            let fetcher = fetcher.clone();

            tasks.spawn(async move {
                match (*fetcher)(key.clone()).await {
                    Ok(value) => {
                        let options = SetOptions::new().ttl(ttl).priority(Priority::High);
                        cache.set(&key, value, options).await;
                        true
                    }
                    Err(e) => {
                        warn!("[{}] warmup of '{}' failed: {}", cache.name(), key, e);
                        false
                    }
                }
            });
        }

        let mut summary = WarmupSummary::default();
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(true) => summary.loaded += 1,
                Ok(false) => summary.failed += 1,
                Err(e) => {
                    warn!("[{}] warmup task aborted: {}", self.name(), e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "[{}] warmup finished: {} loaded, {} failed",
            self.name(),
            summary.loaded,
            summary.failed
        );
        summary
    }
}
