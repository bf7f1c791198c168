//! Expiry Module
//!
//! Decides whether an entry is fresh, stale, or hard-expired.

use std::time::{Duration, Instant};

use crate::cache::CacheEntry;

// == Freshness ==
/// Classification of an entry at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Younger than the staleness window
    Fresh,
    /// Usable, but older than the staleness window and due for a refresh
    Stale,
    /// Past `expires_at`; must be treated as absent
    Expired,
}

/// Returns true once `now` has reached the entry's hard expiry.
///
/// The boundary counts as expired: once the full TTL has elapsed the entry is gone.
pub fn is_expired<V>(entry: &CacheEntry<V>, now: Instant) -> bool {
    now >= entry.expires_at
}

/// Classifies an entry against a soft staleness window measured from creation.
pub fn freshness<V>(entry: &CacheEntry<V>, stale_after: Duration, now: Instant) -> Freshness {
    if is_expired(entry, now) {
        Freshness::Expired
    } else if now.saturating_duration_since(entry.created_at) <= stale_after {
        Freshness::Fresh
    } else {
        Freshness::Stale
    }
}

/// Collects keys of every entry expired at `now`.
pub fn expired_keys<'a, V, I>(entries: I, now: Instant) -> Vec<String>
where
    I: IntoIterator<Item = (&'a String, &'a CacheEntry<V>)>,
    V: 'a,
{
    entries
        .into_iter()
        .filter(|(_, entry)| is_expired(entry, now))
        .map(|(key, _)| key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Payload, Priority};
    use std::collections::{HashMap, HashSet};

    fn entry(key: &str, ttl: Duration) -> CacheEntry<u32> {
        CacheEntry::new(
            key.to_string(),
            Payload::Raw(1),
            ttl,
            Priority::Medium,
            HashSet::new(),
            1,
            0,
        )
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = entry("a", Duration::from_secs(10));
        assert!(!is_expired(&entry, entry.created_at));
        assert!(is_expired(&entry, entry.expires_at));
        assert!(is_expired(&entry, entry.expires_at + Duration::from_millis(1)));
    }

    #[test]
    fn test_freshness_transitions() {
        let entry = entry("a", Duration::from_secs(15 * 60));
        let stale_after = Duration::from_secs(5 * 60);
        let t0 = entry.created_at;

        assert_eq!(freshness(&entry, stale_after, t0), Freshness::Fresh);
        assert_eq!(freshness(&entry, stale_after, t0 + stale_after), Freshness::Fresh);
        assert_eq!(
            freshness(&entry, stale_after, t0 + stale_after + Duration::from_secs(1)),
            Freshness::Stale
        );
        assert_eq!(
            freshness(&entry, stale_after, entry.expires_at),
            Freshness::Expired
        );
    }

    #[test]
    fn test_expired_wins_over_stale_window() {
        // Stale window longer than the TTL
        let entry = entry("a", Duration::from_secs(1));
        let now = entry.created_at + Duration::from_secs(2);
        assert_eq!(
            freshness(&entry, Duration::from_secs(60), now),
            Freshness::Expired
        );
    }

    #[test]
    fn test_expired_keys() {
        let mut entries = HashMap::new();
        entries.insert("short".to_string(), entry("short", Duration::from_secs(1)));
        entries.insert("long".to_string(), entry("long", Duration::from_secs(100)));

        let now = Instant::now() + Duration::from_secs(5);
        let keys = expired_keys(&entries, now);
        assert_eq!(keys, vec!["short".to_string()]);
    }
}
