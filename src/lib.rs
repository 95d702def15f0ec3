//! Polaris Data - data layer of the ad SDK developer console
//!
//! Transport client for the SDK backend, a TTL read-through cache with
//! synthetic fallback, and observable per-resource state for the dashboards.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod sandbox;
pub mod service;
pub mod synthetic;

#[cfg(test)]
mod test_support;

pub use client::{SdkClient, SdkTransport};
pub use config::Config;
pub use error::{SandboxError, TransportError, ValidationError};
pub use models::ApiResponse;
pub use service::{DashboardService, DataSource};
pub use synthetic::{MetricsRange, MetricsResponse};
