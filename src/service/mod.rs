//! Cache Service Module
//!
//! Public, lock-guarded facade over the entry store: get/set, memoize,
//! stale-while-revalidate, tag invalidation, warmup, cleanup, and stats.

mod cache;
mod revalidate;
mod warmup;

pub use cache::{Cache, WeakCache};
pub use revalidate::{SwrOptions, DEFAULT_FRESH_TTL, DEFAULT_STALE_TTL};
pub use warmup::WarmupSummary;
