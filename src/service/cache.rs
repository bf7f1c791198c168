//! Cache Facade
//!
//! Thread-safe handle over a [`CacheStore`]: every operation takes the store
//! lock, so eviction and the insert that triggers it happen atomically.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, SetOptions};
use crate::config::CacheConfig;

// == Cache ==
/// Cloneable handle to one cache domain.
///
/// Clones share the same store; separate `Cache::new` calls share nothing.
pub struct Cache<V> {
    name: Arc<str>,
    pub(crate) store: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            store: self.store.clone(),
        }
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache").field("name", &self.name).finish()
    }
}

impl<V> Cache<V>
where
    V: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Creates an unnamed cache.
    pub fn new(config: CacheConfig) -> Self {
        Self::named("cache", config)
    }

    /// Creates a cache whose name appears in log output.
    pub fn named(name: &str, config: CacheConfig) -> Self {
        Self {
            name: Arc::from(name),
            store: Arc::new(RwLock::new(CacheStore::new(config))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a handle that does not keep the store alive.
    pub fn downgrade(&self) -> WeakCache<V> {
        WeakCache {
            name: self.name.clone(),
            store: Arc::downgrade(&self.store),
        }
    }

    // == Set ==
    pub async fn set(&self, key: &str, value: V, options: SetOptions) {
        self.store.write().await.set(key, value, options);
    }

    // == Get ==
    /// Returns the live value for `key`, or `None` if absent, expired, or undecodable.
    pub async fn get(&self, key: &str) -> Option<V> {
        // Write lock: reads update access metadata and stats
        self.store.write().await.get(key)
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Memoize ==
    /// Returns the cached value, or awaits `producer` on a miss and caches its result.
    ///
    /// The store lock is not held while the producer runs. Producer errors are
    /// returned unchanged and nothing is stored.
    pub async fn memoize<F, Fut, E>(&self, key: &str, producer: F, options: SetOptions) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        debug!("[{}] memoize miss for '{}'", self.name, key);
        let value = producer().await?;
        self.set(key, value.clone(), options).await;
        Ok(value)
    }

    // == Invalidate By Tag ==
    /// Removes every entry tagged `tag`, returning how many were removed.
    pub async fn invalidate_by_tag(&self, tag: &str) -> usize {
        self.store.write().await.invalidate_by_tag(tag)
    }

    // == Cleanup ==
    /// Sweeps expired entries now. Returns the number removed.
    pub async fn cleanup(&self) -> usize {
        let removed = self.store.write().await.cleanup_expired();
        debug!("[{}] cleanup removed {} entries", self.name, removed);
        removed
    }

    /// Drops all entries and resets statistics.
    pub async fn clear(&self) {
        self.store.write().await.clear();
        debug!("[{}] cleared", self.name);
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

// == Weak Cache ==
/// Non-owning handle used by background tasks so they stop with the cache.
pub struct WeakCache<V> {
    name: Arc<str>,
    store: Weak<RwLock<CacheStore<V>>>,
}

impl<V> WeakCache<V> {
    pub fn upgrade(&self) -> Option<Cache<V>> {
        self.store.upgrade().map(|store| Cache {
            name: self.name.clone(),
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Priority;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn cache(max_size: usize) -> Cache<String> {
        Cache::named(
            "test",
            CacheConfig {
                max_size,
                ..CacheConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = cache(100);
        cache.set("biz:42", "bakery".to_string(), SetOptions::new()).await;

        assert_eq!(cache.get("biz:42").await, Some("bakery".to_string()));
        assert_eq!(cache.get("biz:43").await, None);

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.hit_rate, 0.5);
    }

    #[tokio::test]
    async fn test_expiry_scenario() {
        let cache = cache(100);
        cache
            .set(
                "biz:42",
                "bakery".to_string(),
                SetOptions::new()
                    .ttl(Duration::from_millis(1000))
                    .priority(Priority::High),
            )
            .await;

        assert!(cache.get("biz:42").await.is_some());
        assert_eq!(cache.stats().await.hits, 1);

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(cache.get("biz:42").await.is_none());
        assert_eq!(cache.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn test_memoize_hit_skips_producer() {
        let cache = cache(100);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .memoize(
                    "ai:summary",
                    || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, String>("summary".to_string())
                    },
                    SetOptions::new(),
                )
                .await
                .unwrap();
            assert_eq!(value, "summary");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_memoize_propagates_producer_error() {
        let cache = cache(100);

        let result = cache
            .memoize(
                "ai:summary",
                || async { Err::<String, _>("upstream timeout") },
                SetOptions::new(),
            )
            .await;

        assert_eq!(result, Err("upstream timeout"));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalidate_by_tag() {
        let cache = cache(100);
        cache.set("a", "1".to_string(), SetOptions::new().tag("business:7")).await;
        cache.set("b", "2".to_string(), SetOptions::new().tag("business:7")).await;
        cache.set("c", "3".to_string(), SetOptions::new()).await;

        assert_eq!(cache.invalidate_by_tag("business:7").await, 2);
        assert_eq!(cache.keys().await, vec!["c".to_string()]);
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let cache = cache(100);
        cache.set("a", "1".to_string(), SetOptions::new()).await;
        cache.get("a").await;

        cache.clear().await;

        assert_eq!(cache.len().await, 0);
        assert_eq!(cache.stats().await.total_requests, 0);
    }

    #[tokio::test]
    async fn test_cleanup_removes_expired() {
        let cache = cache(100);
        cache
            .set("a", "1".to_string(), SetOptions::new().ttl(Duration::from_millis(20)))
            .await;
        cache.set("b", "2".to_string(), SetOptions::new()).await;

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.cleanup().await, 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_instances_are_isolated() {
        let business = cache(100);
        let search = cache(100);

        business.set("k", "business".to_string(), SetOptions::new()).await;

        assert_eq!(search.get("k").await, None);
        assert_eq!(business.stats().await.misses, 0);
    }

    #[tokio::test]
    async fn test_concurrent_sets_respect_capacity() {
        let cache = cache(50);
        let mut handles = Vec::new();
        for worker in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..100 {
                    cache
                        .set(&format!("w{}:{}", worker, i), "v".to_string(), SetOptions::new())
                        .await;
                    assert!(cache.len().await <= 50);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(cache.len().await <= 50);
        assert!(cache.stats().await.evictions > 0);
    }

    #[tokio::test]
    async fn test_weak_handle_does_not_keep_cache_alive() {
        let cache = cache(10);
        let weak = cache.downgrade();
        assert!(weak.upgrade().is_some());

        drop(cache);
        assert!(weak.upgrade().is_none());
    }
}
