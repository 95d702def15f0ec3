//! Cache Entry Module
//!
//! A stored payload snapshot plus the time it was inserted.

use std::time::Duration;

// == Cache Entry ==
/// Represents a single cache entry with value and insertion time.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub fn new(value: V, inserted_at: u64) -> Self {
        Self { value, inserted_at }
    }

    // == Is Valid ==
    /// Checks whether the entry is still fresh at `now_ms`.
    ///
    /// Boundary condition: valid only while `now - inserted_at < ttl`, so an
    /// entry whose age equals the TTL is already stale.
    pub fn is_valid(&self, now_ms: u64, ttl: Duration) -> bool {
        self.age_ms(now_ms) < ttl.as_millis() as u64
    }

    /// Milliseconds since insertion. A clock that went backwards reads as zero.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.inserted_at)
    }
}
