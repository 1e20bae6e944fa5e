//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired entries out of both
//! caches, so entries nobody reads again still free their storage.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{CacheEngine, Caches};

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// Each run calls `cleanup` on the local and then the session cache from the
/// blocking thread pool. A failing sweep is logged and retried on the next
/// tick.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let caches = Caches::in_memory();
/// let cleanup_handle = spawn_cleanup_task(caches.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(caches: Caches, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            // Sweeping the durable store rewrites its file
            let batch = caches.clone();
            let swept = tokio::task::spawn_blocking(move || {
                sweep("local", &batch.local);
                sweep("session", &batch.session);
            })
            .await;

            if let Err(err) = swept {
                warn!("TTL cleanup run failed: {}", err);
            }
        }
    })
}

fn sweep(name: &str, cache: &CacheEngine) {
    match cache.cleanup() {
        Ok(0) => debug!("TTL cleanup ({}): no expired entries found", name),
        Ok(removed) => info!("TTL cleanup ({}): removed {} expired entries", name, removed),
        Err(err) => warn!("TTL cleanup ({}) failed: {}", name, err),
    }
}
