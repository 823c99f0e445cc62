//! Cache Module
//!
//! Provides an in-memory payload cache with fixed-TTL background expiry.

mod entry;
mod expiring;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiring::ExpiringCache;
pub use stats::CacheStats;
pub use store::CacheStore;

pub(crate) use expiring::lock_store;
