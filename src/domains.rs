//! Cache Domains
//!
//! The application keeps one isolated cache per data domain. They are built
//! once at start-up and handed to consumers explicitly.

use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinHandle;

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::service::Cache;
use crate::tasks::spawn_cleanup_task;

/// Cache holding JSON payloads from upstream services.
pub type JsonCache = Cache<Value>;

pub const BUSINESS: &str = "business";
pub const SEARCH: &str = "search";
pub const AI: &str = "ai";

// == Cache Domains ==
/// Per-domain caches: business listings, search results, AI agent responses.
#[derive(Debug, Clone)]
pub struct CacheDomains {
    pub business: JsonCache,
    pub search: JsonCache,
    pub ai: JsonCache,
    cleanup_interval: Duration,
}

impl CacheDomains {
    /// Builds one cache per domain, each with its own copy of `config`.
    pub fn new(config: &CacheConfig) -> Self {
        let config = config.clone().sanitized();
        Self {
            business: Cache::named(BUSINESS, config.clone()),
            search: Cache::named(SEARCH, config.clone()),
            ai: Cache::named(AI, config.clone()),
            cleanup_interval: config.cleanup_interval,
        }
    }

    /// Looks up a domain by name.
    pub fn get(&self, name: &str) -> Result<&JsonCache> {
        match name {
            BUSINESS => Ok(&self.business),
            SEARCH => Ok(&self.search),
            AI => Ok(&self.ai),
            other => Err(CacheError::UnknownDomain(other.to_string())),
        }
    }

    /// All domains with their names, in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &JsonCache)> {
        [
            (BUSINESS, &self.business),
            (SEARCH, &self.search),
            (AI, &self.ai),
        ]
        .into_iter()
    }

    /// Starts the periodic expiry sweep for every domain.
    pub fn spawn_cleanup_tasks(&self) -> Vec<JoinHandle<()>> {
        self.iter()
            .map(|(_, cache)| spawn_cleanup_task(cache, self.cleanup_interval))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SetOptions;
    use serde_json::json;

    #[test]
    fn test_get_known_and_unknown_domains() {
        let domains = CacheDomains::new(&CacheConfig::default());

        assert_eq!(domains.get("business").unwrap().name(), "business");
        assert_eq!(domains.get("ai").unwrap().name(), "ai");
        assert!(matches!(
            domains.get("weather"),
            Err(CacheError::UnknownDomain(_))
        ));
    }

    #[test]
    fn test_iter_order() {
        let domains = CacheDomains::new(&CacheConfig::default());
        let names: Vec<&str> = domains.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["business", "search", "ai"]);
    }

    #[tokio::test]
    async fn test_domains_are_isolated() {
        let domains = CacheDomains::new(&CacheConfig::default());
        domains
            .business
            .set("biz:42", json!({"name": "Corner Bakery"}), SetOptions::new())
            .await;

        assert!(domains.search.get("biz:42").await.is_none());
        assert_eq!(
            domains.business.get("biz:42").await,
            Some(json!({"name": "Corner Bakery"}))
        );
    }

    #[tokio::test]
    async fn test_spawn_cleanup_tasks() {
        let domains = CacheDomains::new(&CacheConfig::default());
        let handles = domains.spawn_cleanup_tasks();
        assert_eq!(handles.len(), 3);
        for handle in handles {
            handle.abort();
        }
    }
}
