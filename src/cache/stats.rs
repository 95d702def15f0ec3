//! Cache Statistics Module
//!
//! Snapshot of cache contents and lookup counters, for debugging.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of the response cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Entries currently stored, stale ones included until looked up
    pub size: usize,
    /// Entry lifetime in milliseconds
    pub ttl_ms: u64,
    /// Stored keys, sorted
    pub keys: Vec<String>,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing fresh
    pub misses: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
