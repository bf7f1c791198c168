//! Cache Statistics Module
//!
//! Tracks hits, misses, evictions, and the estimated memory footprint.

use serde::Serialize;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// == Cache Stats ==
/// Snapshot of cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that found nothing usable (absent, expired, or undecodable)
    pub misses: u64,
    /// Total reads; always `hits + misses`
    pub total_requests: u64,
    /// Entries removed by the eviction policy
    pub evictions: u64,
    /// Background refreshes started by stale-while-revalidate
    pub revalidations: u64,
    /// Current number of entries
    pub size: usize,
    /// Estimated footprint of stored payloads in MB
    pub memory_usage: f64,
    /// Configured advisory memory ceiling in MB
    pub max_memory_mb: u64,
    /// `hits / total_requests`, 0 before the first request
    pub hit_rate: f64,
}

// == Stats Collector ==
/// Counters updated by the store on every operation.
///
/// Memory usage is a running byte total adjusted as entries come and go.
#[derive(Debug, Default)]
pub struct StatsCollector {
    hits: u64,
    misses: u64,
    evictions: u64,
    revalidations: u64,
    bytes_used: usize,
}

impl StatsCollector {
    // == Constructor ==
    /// Creates a collector with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn record_revalidation(&mut self) {
        self.revalidations += 1;
    }

    // == Memory Accounting ==
    pub fn add_bytes(&mut self, bytes: usize) {
        self.bytes_used += bytes;
    }

    pub fn remove_bytes(&mut self, bytes: usize) {
        self.bytes_used = self.bytes_used.saturating_sub(bytes);
    }

    pub fn memory_usage_mb(&self) -> f64 {
        self.bytes_used as f64 / BYTES_PER_MB
    }

    // == Hit Rate ==
    /// Returns hits / total requests, or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Resets every counter and the byte total.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // == Snapshot ==
    /// Builds a [`CacheStats`] for a store currently holding `size` entries.
    pub fn snapshot(&self, size: usize, max_memory_mb: u64) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            total_requests: self.hits + self.misses,
            evictions: self.evictions,
            revalidations: self.revalidations,
            size,
            memory_usage: self.memory_usage_mb(),
            max_memory_mb,
            hit_rate: self.hit_rate(),
        }
    }
}
