//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries that
//! nobody reads again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between passes.
/// Each pass removes entries one key at a time, so concurrent `put`/`get`
/// calls are never blocked for a whole pass.
///
/// Must be called from within a tokio runtime. The returned handle can be
/// aborted to stop the sweep.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use shared_cache::{spawn_sweep_task, CacheStore};
///
/// # #[tokio::main]
/// # async fn main() {
/// let cache: CacheStore = CacheStore::new();
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(30));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// # }
/// ```
pub fn spawn_sweep_task<V>(cache: CacheStore<V>, interval: Duration) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
