//! Synthetic Module
//!
//! Deterministic dataset served when the backend is unavailable, and the
//! aggregation that turns a metric series into dashboard totals.

mod applications;
mod metrics;

pub use applications::{AppPlatform, AppStatus, Application};
pub use metrics::{aggregate, MetricPoint, MetricsRange, MetricsResponse, ParseRangeError};

/// Precomputed fallback data. Built once and owned by the service.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    series_30d: Vec<MetricPoint>,
    series_24h: Vec<MetricPoint>,
    applications: Vec<Application>,
}

impl SyntheticDataset {
    pub fn new() -> Self {
        Self {
            series_30d: metrics::build_time_series(30),
            series_24h: metrics::build_time_series(24),
            applications: applications::build_applications(),
        }
    }

    /// Points backing `range`. The 7-day series is the tail of the 30-day one.
    pub fn series(&self, range: MetricsRange) -> &[MetricPoint] {
        match range {
            MetricsRange::Last24h => &self.series_24h,
            MetricsRange::Last7d => &self.series_30d[self.series_30d.len().saturating_sub(7)..],
            MetricsRange::Last30d => &self.series_30d,
        }
    }

    /// Aggregated metrics for `range`, recomputed on every call.
    pub fn metrics(&self, range: MetricsRange) -> MetricsResponse {
        aggregate(self.series(range))
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }
}

impl Default for SyntheticDataset {
    fn default() -> Self {
        Self::new()
    }
}
