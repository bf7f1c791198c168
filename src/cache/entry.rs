//! Cache Entry Module
//!
//! Defines individual cache entries, their priority, and per-set options.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Longest TTL an entry can carry; larger values are capped to it.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Priority ==
/// Eviction priority of an entry. Lower priorities are evicted first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

// == Payload ==
/// Stored form of a value: kept as-is, or as gzip-compressed JSON.
#[derive(Debug, Clone)]
pub enum Payload<V> {
    Raw(V),
    Compressed(Vec<u8>),
}

// == Set Options ==
/// Per-entry options accepted by `set`.
///
/// Unset fields fall back to the cache configuration: `ttl` to the default
/// TTL, `compress` to the cache-wide compression flag.
#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    pub ttl: Option<Duration>,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub compress: Option<bool>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = Some(compress);
        self
    }
}

// == Cache Entry ==
/// A single cache entry with its payload and bookkeeping metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub key: String,
    pub payload: Payload<V>,
    pub created_at: Instant,
    pub last_accessed_at: Instant,
    /// Always strictly after `created_at`
    pub expires_at: Instant,
    pub access_count: u64,
    /// Logical access clock, breaks ties between equal `last_accessed_at` values
    pub access_seq: u64,
    pub priority: Priority,
    pub tags: HashSet<String>,
    /// Bytes counted towards memory usage
    pub size_bytes: usize,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` after now.
    ///
    /// `ttl` is kept between one millisecond and [`MAX_TTL`] so that
    /// `expires_at > created_at` and the deadline never overflows. Stores
    /// replace a zero TTL with their default before reaching this point.
    pub fn new(
        key: String,
        payload: Payload<V>,
        ttl: Duration,
        priority: Priority,
        tags: HashSet<String>,
        size_bytes: usize,
        access_seq: u64,
    ) -> Self {
        let now = Instant::now();
        let ttl = ttl.clamp(Duration::from_millis(1), MAX_TTL);

        Self {
            key,
            payload,
            created_at: now,
            last_accessed_at: now,
            expires_at: now + ttl,
            access_count: 0,
            access_seq,
            priority,
            tags,
            size_bytes,
        }
    }

    /// Whether the stored payload must be decoded before use.
    pub fn is_compressed(&self) -> bool {
        matches!(self.payload, Payload::Compressed(_))
    }

    // == Touch ==
    /// Records a successful read.
    pub fn touch(&mut self, access_seq: u64) {
        self.last_accessed_at = Instant::now();
        self.access_seq = access_seq;
        self.access_count += 1;
    }

    /// Remaining time before hard expiry, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
