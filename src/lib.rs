//! Adaptive Cache - in-process caching engine
//!
//! Per-domain caches with TTL expiry, priority/LRU eviction, tag invalidation,
//! payload compression, and stale-while-revalidate refreshes.

pub mod api;
pub mod cache;
pub mod config;
pub mod domains;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStats, Priority, SetOptions};
pub use config::{CacheConfig, Config};
pub use domains::CacheDomains;
pub use error::CacheError;
pub use service::{Cache, SwrOptions, WarmupSummary};
pub use tasks::spawn_cleanup_task;
