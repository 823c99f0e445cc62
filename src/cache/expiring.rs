//! Expiring Cache Module
//!
//! Thread-safe handle over a `CacheStore` with a background reaper whose
//! lifetime is bound to the handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{CacheError, CacheResult};
use crate::tasks::spawn_reaper;

// == Expiring Cache ==
/// A time-bounded key-value cache for raw response payloads.
///
/// `add` and `get` are synchronous and only ever wait on the single
/// store lock. Exactly one reaper task sweeps expired entries every
/// `ttl`. The reaper stops when the cache is shut down or dropped.
///
/// Share it by wrapping it in an `Arc`; there is no global instance.
#[derive(Debug)]
pub struct ExpiringCache {
    /// Entries and statistics behind the one exclusive lock
    store: Arc<Mutex<CacheStore>>,
    /// Signals the reaper to exit
    shutdown: CancellationToken,
    /// Reaper task, taken on shutdown
    reaper: Option<JoinHandle<()>>,
}

impl ExpiringCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current tokio runtime.
    ///
    /// # Errors
    /// - `CacheError::InvalidTtl` if `ttl` is zero
    /// - `CacheError::NoRuntime` if called outside a tokio runtime
    pub fn new(ttl: Duration) -> CacheResult<Self> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl);
        }
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let shutdown = CancellationToken::new();
        let reaper = spawn_reaper(&runtime, store.clone(), ttl, shutdown.clone());

        debug!(ttl_ms = ttl.as_millis() as u64, "expiring cache created");

        Ok(Self {
            store,
            shutdown,
            reaper: Some(reaper),
        })
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// An empty key or value is rejected with `CacheError::InvalidInput`
    /// and the cache is left unchanged.
    /// Rejections are reported to the caller only, never logged here.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> CacheResult<()> {
        lock_store(&self.store).add(key.into(), value.into())
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`, if any.
    ///
    /// Entries past their TTL remain visible until the next sweep.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        lock_store(&self.store).get(key)
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        lock_store(&self.store).stats()
    }

    pub fn len(&self) -> usize {
        lock_store(&self.store).len()
    }

    pub fn is_empty(&self) -> bool {
        lock_store(&self.store).is_empty()
    }

    pub fn ttl(&self) -> Duration {
        lock_store(&self.store).ttl()
    }

    // == Is Running ==
    /// Returns true while the reaper task is alive.
    pub fn is_running(&self) -> bool {
        self.reaper
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        if let Some(reaper) = self.reaper.take() {
            if let Err(err) = reaper.await {
                warn!("reaper task ended abnormally: {}", err);
            }
        }
        debug!("expiring cache shut down");
    }
}

impl Drop for ExpiringCache {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Acquires the store lock, recovering it if a holder panicked.
pub(crate) fn lock_store(store: &Mutex<CacheStore>) -> MutexGuard<'_, CacheStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
