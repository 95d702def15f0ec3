//! Metric time series and aggregation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dashboard time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MetricsRange {
    #[serde(rename = "24h")]
    Last24h,
    #[serde(rename = "7d")]
    Last7d,
    #[default]
    #[serde(rename = "30d")]
    Last30d,
}

impl MetricsRange {
    pub const ALL: [MetricsRange; 3] = [
        MetricsRange::Last24h,
        MetricsRange::Last7d,
        MetricsRange::Last30d,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricsRange::Last24h => "24h",
            MetricsRange::Last7d => "7d",
            MetricsRange::Last30d => "30d",
        }
    }

    /// Cache key of the aggregate for this range, e.g. `metrics-24h`.
    pub fn cache_key(&self) -> String {
        format!("metrics-{}", self.as_str())
    }
}

impl fmt::Display for MetricsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown metrics range: {0} (expected 24h, 7d or 30d)")]
pub struct ParseRangeError(String);

impl FromStr for MetricsRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(MetricsRange::Last24h),
            "7d" => Ok(MetricsRange::Last7d),
            "30d" => Ok(MetricsRange::Last30d),
            other => Err(ParseRangeError(other.to_string())),
        }
    }
}

/// One day of traffic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    pub requests: u64,
    pub errors: u64,
    pub active_apps: u64,
    pub latency: u64,
    pub impressions: u64,
    pub clicks: u64,
    pub revenue: f64,
}

/// Totals and averages over a metric series, plus the series itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub total_requests: u64,
    pub total_errors: u64,
    /// Percentage, two decimals
    pub error_rate: f64,
    pub avg_active_apps: u64,
    pub avg_latency: u64,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub total_revenue: f64,
    pub data: Vec<MetricPoint>,
}

/// Last day of every synthetic series.
fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 6).expect("anchor date is valid")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Builds `days` daily points ending at the anchor date, oldest first.
pub(crate) fn build_time_series(days: u64) -> Vec<MetricPoint> {
    let anchor = anchor_date();

    (0..days)
        .rev()
        .map(|i| {
            let date = anchor.checked_sub_days(Days::new(i)).unwrap_or(anchor);
            let week_factor = match date.weekday() {
                Weekday::Sat | Weekday::Sun => 0.75,
                _ => 1.0,
            };

            let x = i as f64;
            let base =
                ((40_000.0 + (x / 4.5).sin() * 5_000.0 + (x / 3.0).cos() * 3_000.0) * week_factor)
                    .floor() as u64;
            let requests = base + (i * 137) % 4_000;

            MetricPoint {
                date: date.format("%Y-%m-%d").to_string(),
                requests,
                errors: (requests as f64 * 0.004).floor() as u64 + (i * 23) % 80,
                active_apps: 200 + (i * 17) % 40,
                latency: 45 + (i * 11) % 30,
                impressions: (requests as f64 * 0.82).floor() as u64 + (i * 97) % 3_000,
                clicks: (requests as f64 * 0.041).floor() as u64 + (i * 31) % 300,
                revenue: round2(requests as f64 * 0.0021 + ((i * 7) % 15) as f64),
            }
        })
        .collect()
}

/// Sums and averages a series into dashboard totals.
///
/// Error rate is `errors / requests * 100` rounded to two decimals, or 0 when
/// there were no requests. Averages are rounded to the nearest integer.
pub fn aggregate(points: &[MetricPoint]) -> MetricsResponse {
    let total_requests: u64 = points.iter().map(|p| p.requests).sum();
    let total_errors: u64 = points.iter().map(|p| p.errors).sum();
    let total_revenue: f64 = points.iter().map(|p| p.revenue).sum();

    let average = |sum: u64| -> u64 {
        if points.is_empty() {
            0
        } else {
            (sum as f64 / points.len() as f64).round() as u64
        }
    };

    let error_rate = if total_requests > 0 {
        round2(total_errors as f64 / total_requests as f64 * 100.0)
    } else {
        0.0
    };

    MetricsResponse {
        total_requests,
        total_errors,
        error_rate,
        avg_active_apps: average(points.iter().map(|p| p.active_apps).sum()),
        avg_latency: average(points.iter().map(|p| p.latency).sum()),
        total_impressions: points.iter().map(|p| p.impressions).sum(),
        total_clicks: points.iter().map(|p| p.clicks).sum(),
        total_revenue: round2(total_revenue),
        data: points.to_vec(),
    }
}
