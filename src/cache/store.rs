//! Cache Store Module
//!
//! The lock-protected state behind `ExpiringCache`: a HashMap of entries
//! plus activity statistics. Every method here assumes the caller holds
//! the cache lock.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};
use crate::error::{CacheError, CacheResult};

// == Cache Store ==
/// Key-value storage with a fixed TTL used for sweeping.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Activity statistics
    stats: CacheStats,
    /// Age at which an entry becomes eligible for removal
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, stamped with the current instant.
    ///
    /// Empty keys and empty values are rejected and leave the entries untouched.
    pub fn add(&mut self, key: String, value: Vec<u8>) -> CacheResult<()> {
        if key.is_empty() {
            self.stats.record_rejection();
            return Err(CacheError::InvalidInput("key is empty".to_string()));
        }
        if value.is_empty() {
            self.stats.record_rejection();
            return Err(CacheError::InvalidInput(format!(
                "value for key '{}' is empty",
                key
            )));
        }

        self.entries.insert(key, CacheEntry::new(value));
        self.stats.record_insertion();
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`.
    ///
    /// Expiry is not checked here; stale entries stay visible until swept.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Sweep Expired ==
    /// Removes every entry whose age as of `now` is at least the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now, ttl));

        let removed = before - self.entries.len();
        self.stats.record_sweep(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the current number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn entries_mut(&mut self) -> &mut HashMap<String, CacheEntry> {
        &mut self.entries
    }
}
