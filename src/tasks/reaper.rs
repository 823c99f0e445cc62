//! Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::{lock_store, CacheStore};

/// Spawns the task that sweeps expired entries out of `store`.
///
/// The task sleeps for `interval` between sweeps. Each sweep takes the
/// store lock, removes every entry whose age is at least the store TTL
/// and releases the lock before sleeping again. It exits as soon as
/// `shutdown` is cancelled.
///
/// # Arguments
/// * `runtime` - Runtime the task is spawned on
/// * `store` - Shared store to sweep
/// * `interval` - Time between sweeps, the cache TTL
/// * `shutdown` - Token that stops the loop
pub fn spawn_reaper(
    runtime: &Handle,
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        debug!(
            "Starting reaper with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }

            let (removed, remaining) = {
                let mut guard = lock_store(&store);
                let removed = guard.sweep_expired(Instant::now());
                (removed, guard.len())
            };

            if removed > 0 {
                info!(
                    "Reaper: removed {} expired entries, {} remaining",
                    removed, remaining
                );
            } else {
                debug!("Reaper: no expired entries found");
            }
        }

        debug!("Reaper stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_store(ttl: Duration) -> Arc<Mutex<CacheStore>> {
        Arc::new(Mutex::new(CacheStore::new(ttl)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_removes_expired_entries() {
        let ttl = Duration::from_secs(1);
        let store = shared_store(ttl);
        lock_store(&store)
            .add("expire_soon".to_string(), b"value".to_vec())
            .unwrap();

        let token = CancellationToken::new();
        let handle = spawn_reaper(&Handle::current(), store.clone(), ttl, token.clone());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(lock_store(&store).get("expire_soon"), None);

        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_preserves_fresh_entries() {
        let ttl = Duration::from_secs(1);
        let store = shared_store(ttl);

        let token = CancellationToken::new();
        let handle = spawn_reaper(&Handle::current(), store.clone(), ttl, token.clone());

        // Inserted halfway through the first period, so the first sweep keeps it
        tokio::time::sleep(Duration::from_millis(500)).await;
        lock_store(&store)
            .add("young".to_string(), b"value".to_vec())
            .unwrap();
        tokio::time::sleep(Duration::from_millis(700)).await;

        assert_eq!(lock_store(&store).get("young"), Some(b"value".to_vec()));

        // Second sweep at 2s sees an age of 1.5s
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(lock_store(&store).get("young"), None);

        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_reaper_exits_on_cancel() {
        let interval = Duration::from_secs(3600);
        let store = shared_store(interval);
        let token = CancellationToken::new();
        let handle = spawn_reaper(&Handle::current(), store, interval, token.clone());

        token.cancel();

        // Would hang for an hour if the sleep were not interrupted
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("reaper should stop promptly")
            .unwrap();
    }
}
