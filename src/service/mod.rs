//! Service Module
//!
//! Read-through caching over the metrics and application resources, with
//! silent fallback to the synthetic dataset when the backend is down.

mod dashboard;
mod source;

pub use dashboard::{CachedResource, DashboardService, APPLICATIONS_KEY};
pub use source::DataSource;
