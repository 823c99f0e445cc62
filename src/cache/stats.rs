//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, insertions, rejections and sweeps.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache activity counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found a value
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of accepted inserts, replacements included
    pub insertions: u64,
    /// Number of inserts rejected for empty key or value
    pub rejections: u64,
    /// Number of entries removed by the reaper
    pub reaped: u64,
    /// Number of completed reaper sweeps
    pub sweeps: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    // == Record Sweep ==
    /// Counts one reaper pass and the entries it removed.
    pub fn record_sweep(&mut self, removed: usize) {
        self.sweeps += 1;
        self.reaped += removed as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_sweep_accumulates() {
        let mut stats = CacheStats::new();
        stats.record_sweep(3);
        stats.record_sweep(0);
        stats.record_sweep(2);
        assert_eq!(stats.sweeps, 3);
        assert_eq!(stats.reaped, 5);
    }

    #[test]
    fn test_serializes_counters() {
        let mut stats = CacheStats::new();
        stats.record_insertion();
        stats.record_rejection();
        stats.set_total_entries(1);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["insertions"], 1);
        assert_eq!(json["rejections"], 1);
        assert_eq!(json["total_entries"], 1);
    }
}
