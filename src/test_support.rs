//! In-process transport fake shared by unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::SdkTransport;
use crate::models::{
    AdContent, AdRequestParams, AdResponse, ApiResponse, DeviceInfo, HealthCheckResponse,
    Platform, SdkConfig, SdkInitResponse, TrackEventPayload,
};

/// Transport whose health can be toggled and whose calls are counted.
#[derive(Debug)]
pub(crate) struct FakeTransport {
    healthy: AtomicBool,
    pub(crate) health_probes: AtomicUsize,
    pub(crate) tracked: AtomicUsize,
}

impl FakeTransport {
    pub(crate) fn healthy() -> Self {
        Self {
            healthy: AtomicBool::new(true),
            health_probes: AtomicUsize::new(0),
            tracked: AtomicUsize::new(0),
        }
    }

    pub(crate) fn unhealthy() -> Self {
        let fake = Self::healthy();
        fake.set_healthy(false);
        fake
    }

    pub(crate) fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub(crate) fn probes(&self) -> usize {
        self.health_probes.load(Ordering::SeqCst)
    }

    fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SdkTransport for FakeTransport {
    async fn health_check(&self) -> ApiResponse<HealthCheckResponse> {
        self.health_probes.fetch_add(1, Ordering::SeqCst);
        if self.is_healthy() {
            ApiResponse::ok(HealthCheckResponse::healthy())
        } else {
            ApiResponse::err("error sending request: connection refused")
        }
    }

    async fn init(&self, device: &DeviceInfo) -> ApiResponse<SdkInitResponse> {
        if !self.is_healthy() {
            return ApiResponse::err("HTTP 503: Service Unavailable");
        }
        ApiResponse::ok(SdkInitResponse {
            session_id: format!("sess_{}", device.device_id),
            config: SdkConfig {
                validation_nonce: "nonce".to_string(),
            },
        })
    }

    async fn track_event(&self, payload: &TrackEventPayload) -> ApiResponse<Value> {
        if !self.is_healthy() {
            return ApiResponse::err("HTTP 503: Service Unavailable");
        }
        self.tracked.fetch_add(1, Ordering::SeqCst);
        ApiResponse::ok(json!({ "eventType": payload.event_type }))
    }

    async fn request_ad(&self, params: &AdRequestParams) -> ApiResponse<AdResponse> {
        if !self.is_healthy() {
            return ApiResponse::err("HTTP 503: Service Unavailable");
        }
        ApiResponse::ok(AdResponse {
            ad_id: format!("ad_{}", params.ad_type.as_str()),
            campaign_id: "cmp_test".to_string(),
            content: AdContent {
                title: "Test ad".to_string(),
                description: "Served by the fake transport".to_string(),
                image_url: "https://cdn.example/test.png".to_string(),
            },
        })
    }
}

pub(crate) fn sample_device(device_id: &str) -> DeviceInfo {
    DeviceInfo {
        device_id: device_id.to_string(),
        platform: Platform::Ios,
        os_version: "17.2".to_string(),
        device_model: "iPhone 15".to_string(),
        app_version: "2.3.0".to_string(),
        sdk_version: "4.2.1".to_string(),
        advertising_id: "idfa-1".to_string(),
        country: "US".to_string(),
    }
}
