//! Cache Store Module
//!
//! Keyed response cache with fixed TTL. Expired entries are dropped lazily,
//! on the lookup that finds them stale.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, CACHE_TTL};

/// Cache handle shared between the service and whoever wants to inspect it.
pub type SharedCache<V> = Arc<RwLock<ResponseCache<V>>>;

// == Response Cache ==
/// Resource-keyed cache of response snapshots.
#[derive(Debug)]
pub struct ResponseCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Entry lifetime
    ttl: Duration,
    /// Time source for insertion and expiry
    clock: Arc<dyn Clock>,
    hits: u64,
    misses: u64,
}

impl<V: Clone> ResponseCache<V> {
    // == Constructor ==
    /// Creates an empty cache with the standard TTL and the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache with the standard TTL and a custom clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl: CACHE_TTL,
            clock,
            hits: 0,
            misses: 0,
        }
    }

    /// Wraps the cache for sharing.
    pub fn shared(self) -> SharedCache<V> {
        Arc::new(RwLock::new(self))
    }

    // == Get ==
    /// Returns the stored value if present and fresh.
    ///
    /// A stale entry is removed and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if entry.is_valid(now, self.ttl) => {
                self.hits += 1;
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.misses += 1;
                None
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous entry and
    /// restarting its TTL.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let entry = CacheEntry::new(value, self.clock.now_ms());
        self.entries.insert(key.into(), entry);
    }

    // == Remove ==
    /// Removes one entry. Returns whether it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();

        CacheStats {
            size: self.entries.len(),
            ttl_ms: self.ttl.as_millis() as u64,
            keys,
            hits: self.hits,
            misses: self.misses,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
