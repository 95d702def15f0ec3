//! Data source policy
//!
//! Which backing a fetch is served from, decided per call by the health probe.

use serde::Serialize;

use crate::models::ApiResponse;

/// Backing chosen for a single cache miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Backend answered the health probe
    Remote,
    /// Backend unreachable or unhealthy; serve the synthetic dataset
    SyntheticFallback,
}

impl DataSource {
    /// Picks the source from a health probe outcome.
    pub fn from_probe<T>(probe: &ApiResponse<T>) -> Self {
        if probe.success {
            DataSource::Remote
        } else {
            DataSource::SyntheticFallback
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, DataSource::SyntheticFallback)
    }
}
