//! Cache Entry Module
//!
//! Defines a single cached payload and the moment it was inserted.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A cached payload with its insertion timestamp.
///
/// The value is opaque bytes; the cache never interprets it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// Monotonic insertion time, never changes after creation
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Returns how long the entry has lived as of `now`.
    ///
    /// Saturates to zero if `now` is earlier than the insertion time.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has reached its TTL as of `now`.
    ///
    /// Boundary condition: an entry whose age is exactly `ttl` is expired.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }
}
