//! Cache Module
//!
//! Single-domain entry store with TTL expiry, priority/LRU eviction,
//! tag invalidation, payload compression, and statistics.

pub mod codec;
mod entry;
pub mod eviction;
pub mod expiry;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, Payload, Priority, SetOptions, MAX_TTL};
pub use expiry::Freshness;
pub use stats::{CacheStats, StatsCollector};
pub use store::CacheStore;
