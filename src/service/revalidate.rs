//! Stale-While-Revalidate
//!
//! Serves aging entries immediately and refreshes them on a detached task.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{Freshness, Priority, SetOptions};
use crate::service::Cache;

pub const DEFAULT_STALE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_FRESH_TTL: Duration = Duration::from_secs(15 * 60);

// == SWR Options ==
/// Timing and metadata for [`Cache::stale_while_revalidate`].
#[derive(Debug, Clone)]
pub struct SwrOptions {
    /// Age after which an entry is served stale and refreshed in the background
    pub stale_ttl: Duration,
    /// Hard TTL given to every value the producer returns
    pub fresh_ttl: Duration,
    pub priority: Priority,
    pub tags: Vec<String>,
}

impl Default for SwrOptions {
    fn default() -> Self {
        Self {
            stale_ttl: DEFAULT_STALE_TTL,
            fresh_ttl: DEFAULT_FRESH_TTL,
            priority: Priority::default(),
            tags: Vec::new(),
        }
    }
}

impl SwrOptions {
    pub fn new(stale_ttl: Duration, fresh_ttl: Duration) -> Self {
        Self {
            stale_ttl,
            fresh_ttl,
            ..Self::default()
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    fn set_options(&self) -> SetOptions {
        let fresh_ttl = if self.fresh_ttl.is_zero() {
            DEFAULT_FRESH_TTL
        } else {
            self.fresh_ttl
        };
        SetOptions::new()
            .ttl(fresh_ttl)
            .priority(self.priority)
            .tags(self.tags.iter().cloned())
    }

    fn effective_stale_ttl(&self) -> Duration {
        if self.stale_ttl.is_zero() {
            DEFAULT_STALE_TTL
        } else {
            self.stale_ttl
        }
    }
}

impl<V> Cache<V>
where
    V: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    // == Stale While Revalidate ==
    /// Returns the cached value for `key`, refreshing it in the background once stale.
    ///
    /// - Miss: awaits `producer`, stores the result with `fresh_ttl`; errors propagate.
    /// - Fresh hit: returns the cached value.
    /// - Stale hit: returns the cached value at once and spawns `producer`; on
    ///   failure the stale entry stays until the next call retries.
    ///
    /// Concurrent stale reads of one key each spawn their own refresh.
    pub async fn stale_while_revalidate<F, Fut, E>(
        &self,
        key: &str,
        producer: F,
        options: SwrOptions,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let cached = {
            let mut store = self.store.write().await;
            let cached = store.get_with_freshness(key, options.effective_stale_ttl());
            if let Some((_, Freshness::Stale)) = &cached {
                store.record_revalidation();
            }
            cached
        };

        match cached {
            Some((value, Freshness::Stale)) => {
                self.spawn_refresh(key.to_string(), producer, options.set_options());
                Ok(value)
            }
            Some((value, _)) => Ok(value),
            None => {
                debug!("[{}] swr miss for '{}'", self.name(), key);
                let value = producer().await?;
                self.set(key, value.clone(), options.set_options()).await;
                Ok(value)
            }
        }
    }

    fn spawn_refresh<F, Fut, E>(&self, key: String, producer: F, options: SetOptions)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let cache = self.clone();
        debug!("[{}] revalidating stale '{}'", cache.name(), key);

        tokio::spawn(async move {
            match producer().await {
                Ok(value) => {
                    cache.set(&key, value, options).await;
                    debug!("[{}] refreshed '{}'", cache.name(), key);
                }
                Err(e) => {
                    warn!(
                        "[{}] background refresh of '{}' failed, keeping stale value: {}",
                        cache.name(),
                        key,
                        e
                    );
                }
            }
        });
    }
}
