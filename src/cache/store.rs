//! Cache Store Module
//!
//! Entry storage combining TTL expiry, priority/LRU eviction, tag indexing,
//! payload compression, and statistics. Not synchronized; callers wrap it in
//! a lock (see `service::Cache`).

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::expiry::{self, Freshness};
use crate::cache::{codec, eviction, CacheEntry, CacheStats, Payload, SetOptions, StatsCollector};
use crate::config::CacheConfig;

// == Cache Store ==
/// Single-domain entry store.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Tag to keys carrying it
    tag_index: HashMap<String, HashSet<String>>,
    /// Performance statistics
    stats: StatsCollector,
    config: CacheConfig,
    /// Logical clock stamped on every insert and read
    access_clock: u64,
    /// Whether the advisory memory ceiling is currently exceeded
    over_memory_budget: bool,
}

impl<V> CacheStore<V>
where
    V: Clone + Serialize + DeserializeOwned,
{
    // == Constructor ==
    /// Creates a store; invalid config values fall back to defaults.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            tag_index: HashMap::new(),
            stats: StatsCollector::new(),
            config: config.sanitized(),
            access_clock: 0,
            over_memory_budget: false,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Set ==
    /// Stores a value, replacing any entry under the same key.
    ///
    /// Inserting a new key into a full store first runs one eviction pass.
    pub fn set(&mut self, key: impl Into<String>, value: V, options: SetOptions) {
        let key = key.into();
        let ttl = match options.ttl {
            Some(ttl) if !ttl.is_zero() => ttl,
            _ => self.config.default_ttl,
        };
        let compress = options.compress.unwrap_or(self.config.compression_enabled);
        let (payload, size_bytes) = self.encode(&key, value, compress);

        // Entry is complete before the store is modified
        let seq = self.next_seq();
        let entry = CacheEntry::new(
            key.clone(),
            payload,
            ttl,
            options.priority,
            options.tags.into_iter().collect(),
            size_bytes,
            seq,
        );

        if self.entries.contains_key(&key) {
            self.remove_entry(&key);
        } else if self.entries.len() >= self.config.max_size {
            self.evict();
        }

        for tag in &entry.tags {
            self.tag_index
                .entry(tag.clone())
                .or_default()
                .insert(key.clone());
        }
        debug!(
            "Stored '{}' ({} bytes, compressed={}, ttl={:?})",
            key,
            size_bytes,
            entry.is_compressed(),
            ttl
        );

        self.stats.add_bytes(size_bytes);
        self.entries.insert(key, entry);
        self.check_memory_budget();
    }

    // == Get ==
    /// Retrieves a live value, recording a hit or a miss.
    ///
    /// Expired and undecodable entries are removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.read(key, Duration::MAX).map(|(value, _)| value)
    }

    /// Like [`get`](Self::get), also classifying the entry against a staleness window.
    pub fn get_with_freshness(&mut self, key: &str, stale_after: Duration) -> Option<(V, Freshness)> {
        self.read(key, stale_after)
    }

    fn read(&mut self, key: &str, stale_after: Duration) -> Option<(V, Freshness)> {
        let now = Instant::now();

        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let freshness = expiry::freshness(entry, stale_after, now);
        if freshness == Freshness::Expired {
            debug!("'{}' expired on read", key);
            self.remove_entry(key);
            self.stats.record_miss();
            return None;
        }

        let decoded = match &entry.payload {
            Payload::Raw(value) => Ok(value.clone()),
            Payload::Compressed(bytes) => codec::decompress(bytes),
        };
        let value = match decoded {
            Ok(value) => value,
            Err(e) => {
                warn!("Dropping undecodable entry '{}': {}", key, e);
                self.remove_entry(key);
                self.stats.record_miss();
                return None;
            }
        };

        let seq = self.next_seq();
        if let Some(entry) = self.entries.get_mut(key) {
            entry.touch(seq);
        }
        self.stats.record_hit();
        Some((value, freshness))
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Invalidate By Tag ==
    /// Removes every entry carrying `tag`. Returns the number removed.
    pub fn invalidate_by_tag(&mut self, tag: &str) -> usize {
        let Some(keys) = self.tag_index.remove(tag) else {
            return 0;
        };

        let removed = keys
            .iter()
            .filter(|key| self.remove_entry(key).is_some())
            .count();
        debug!("Invalidated {} entries tagged '{}'", removed, tag);
        removed
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired = expiry::expired_keys(&self.entries, Instant::now());
        for key in &expired {
            self.remove_entry(key);
        }
        expired.len()
    }

    // == Clear ==
    /// Drops all entries and resets statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.tag_index.clear();
        self.stats.reset();
        self.over_memory_budget = false;
    }

    // == Keys ==
    /// Keys of all entries that have not expired.
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|(_, entry)| !expiry::is_expired(entry, now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Read-only view of an entry's metadata; does not count as a request.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
            .snapshot(self.entries.len(), self.config.max_memory_mb)
    }

    pub fn record_revalidation(&mut self) {
        self.stats.record_revalidation();
    }

    /// Returns the current number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internals ==
    fn next_seq(&mut self) -> u64 {
        self.access_clock += 1;
        self.access_clock
    }

    fn encode(&self, key: &str, value: V, compress: bool) -> (Payload<V>, usize) {
        let json = match codec::to_json(&value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Cannot size '{}', storing uncompressed: {}", key, e);
                return (Payload::Raw(value), std::mem::size_of::<V>());
            }
        };

        if !compress || json.len() <= self.config.compression_threshold {
            return (Payload::Raw(value), json.len());
        }

        match codec::compress_json(&json) {
            Ok(bytes) => {
                let size = bytes.len();
                (Payload::Compressed(bytes), size)
            }
            Err(e) => {
                warn!("Compression of '{}' failed, storing uncompressed: {}", key, e);
                (Payload::Raw(value), json.len())
            }
        }
    }

    fn evict(&mut self) {
        let victims = eviction::select_victims(&self.entries);
        for key in &victims {
            self.remove_entry(key);
        }
        self.stats.record_evictions(victims.len());
        debug!("Evicted {} entries: {:?}", victims.len(), victims);
    }

    /// Removes an entry along with its tag index and byte accounting.
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.stats.remove_bytes(entry.size_bytes);

        for tag in &entry.tags {
            if let Some(keys) = self.tag_index.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.tag_index.remove(tag);
                }
            }
        }
        Some(entry)
    }

    fn check_memory_budget(&mut self) {
        let usage = self.stats.memory_usage_mb();
        let over = usage > self.config.max_memory_mb as f64;
        if over && !self.over_memory_budget {
            warn!(
                "Memory usage {:.2} MB exceeds advisory limit of {} MB",
                usage, self.config.max_memory_mb
            );
        }
        self.over_memory_budget = over;
    }
}
