//! Cache Module
//!
//! In-memory read-through cache with a fixed TTL and lazy expiry.

mod clock;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::{ResponseCache, SharedCache};

use std::time::Duration;

// == Public Constants ==
/// Lifetime of every cached response
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
