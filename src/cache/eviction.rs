//! Eviction Policy Module
//!
//! Priority-then-recency victim selection used when a store is full.

use std::collections::HashMap;

use crate::cache::CacheEntry;

/// Share of the store removed by one eviction pass.
pub const EVICTION_FRACTION: f64 = 0.2;

// == Eviction Count ==
/// Number of entries one pass removes from a store holding `len` entries.
///
/// 20% of the store rounded down, never less than one, never more than `len`.
pub fn eviction_count(len: usize) -> usize {
    let count = (len as f64 * EVICTION_FRACTION).floor() as usize;
    count.max(1).min(len)
}

// == Select Victims ==
/// Picks the keys to evict, lowest priority first, then least recently used.
///
/// Returns up to [`eviction_count`] keys; empty only when `entries` is empty.
pub fn select_victims<V>(entries: &HashMap<String, CacheEntry<V>>) -> Vec<String> {
    let count = eviction_count(entries.len());

    let mut candidates: Vec<&CacheEntry<V>> = entries.values().collect();
    candidates.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(a.last_accessed_at.cmp(&b.last_accessed_at))
            .then(a.access_seq.cmp(&b.access_seq))
    });

    candidates
        .into_iter()
        .take(count)
        .map(|entry| entry.key.clone())
        .collect()
}
