//! Transport trait
//!
//! Seam between the caching service / hooks and the HTTP client, so both can
//! be driven by an in-process fake.

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{
    AdRequestParams, AdResponse, ApiResponse, DeviceInfo, HealthCheckResponse, SdkInitResponse,
    TrackEventPayload,
};

/// Remote operations of the SDK backend.
///
/// Implementations must not panic or propagate errors: every failure is
/// reported as `ApiResponse { success: false, error: Some(..) }`.
#[async_trait]
pub trait SdkTransport: Send + Sync {
    /// `GET /health`
    async fn health_check(&self) -> ApiResponse<HealthCheckResponse>;

    /// `POST /v1/init`. A successful call replaces the stored session id.
    async fn init(&self, device: &DeviceInfo) -> ApiResponse<SdkInitResponse>;

    /// `POST /v1/track`
    async fn track_event(&self, payload: &TrackEventPayload) -> ApiResponse<Value>;

    /// `GET /v1/ad-request`
    async fn request_ad(&self, params: &AdRequestParams) -> ApiResponse<AdResponse>;
}
