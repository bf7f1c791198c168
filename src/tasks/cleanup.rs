//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired cache entries.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::service::Cache;

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// The task holds only a weak reference: it exits on its own once every
/// handle to the cache is dropped. Abort the returned handle on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Cache::<String>::named("business", CacheConfig::default());
/// let cleanup_handle = spawn_cleanup_task(&cache, Duration::from_secs(300));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<V>(cache: &Cache<V>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let weak = cache.downgrade();
    let name = cache.name().to_string();

    tokio::spawn(async move {
        info!(
            "[{}] starting TTL cleanup task with interval of {:?}",
            name, interval
        );

        loop {
            tokio::time::sleep(interval).await;

            let Some(cache) = weak.upgrade() else {
                debug!("[{}] cache dropped, stopping cleanup task", name);
                break;
            };

            let removed = cache.cleanup().await;
            if removed > 0 {
                info!("[{}] TTL cleanup: removed {} expired entries", name, removed);
            } else {
                debug!("[{}] TTL cleanup: no expired entries found", name);
            }
        }
    })
}
