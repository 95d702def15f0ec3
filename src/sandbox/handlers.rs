//! Sandbox Handlers
//!
//! HTTP request handlers for each endpoint the SDK client consumes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::current_timestamp_ms;
use crate::client::SDK_KEY_HEADER;
use crate::error::{Result, SandboxError};
use crate::models::{
    AdContent, AdRequestParams, AdResponse, ApiResponse, DeviceInfo, EventType,
    HealthCheckResponse, Platform, SdkConfig, SdkInitResponse, TrackEventPayload,
};

/// A session opened through `POST /v1/init`.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub device_id: String,
    pub platform: Platform,
    pub validation_nonce: String,
    pub events: u64,
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct SandboxState {
    /// Key every `/v1` call must present
    sdk_key: Arc<str>,
    /// Open sessions by id
    pub sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
    issued: Arc<AtomicU64>,
}

impl SandboxState {
    pub fn new(sdk_key: impl Into<String>) -> Self {
        Self {
            sdk_key: Arc::from(sdk_key.into()),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a new SandboxState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.sdk_key.clone())
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<()> {
        let presented = headers
            .get(SDK_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        match presented {
            Some(key) if key == &*self.sdk_key => Ok(()),
            _ => Err(SandboxError::Unauthorized),
        }
    }

    fn next_session(&self) -> (String, String) {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let session_id = format!("sess_{:x}_{}", current_timestamp_ms(), n);
        let nonce = format!("vn_{:08x}", n.wrapping_mul(2_654_435_761) as u32);
        (session_id, nonce)
    }
}

/// Handler for GET /health
///
/// Answers with a bare payload, without the envelope.
pub async fn health_handler() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::healthy())
}

/// Handler for POST /v1/init
///
/// Validates the device and opens a session.
pub async fn init_handler(
    State(state): State<SandboxState>,
    headers: HeaderMap,
    Json(device): Json<DeviceInfo>,
) -> Result<Json<ApiResponse<SdkInitResponse>>> {
    state.authorize(&headers)?;
    device.validate()?;

    let (session_id, validation_nonce) = state.next_session();
    let record = SessionRecord {
        device_id: device.device_id.clone(),
        platform: device.platform,
        validation_nonce: validation_nonce.clone(),
        events: 0,
    };
    state
        .sessions
        .write()
        .await
        .insert(session_id.clone(), record);

    info!(%session_id, device_id = %device.device_id, "Session opened");

    Ok(Json(ApiResponse::ok(SdkInitResponse {
        session_id,
        config: SdkConfig { validation_nonce },
    })))
}

/// Handler for POST /v1/track
///
/// Records an event against a known session. Rewards must echo the
/// session's validation nonce.
pub async fn track_handler(
    State(state): State<SandboxState>,
    headers: HeaderMap,
    Json(payload): Json<TrackEventPayload>,
) -> Result<Json<ApiResponse<Value>>> {
    state.authorize(&headers)?;

    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&payload.session_id)
        .ok_or_else(|| SandboxError::UnknownSession(payload.session_id.clone()))?;

    if payload.event_type == EventType::Reward
        && payload.validation_nonce.as_deref() != Some(session.validation_nonce.as_str())
    {
        return Err(SandboxError::InvalidRequest(
            "Invalid validation nonce".to_string(),
        ));
    }

    session.events += 1;
    debug!(
        session_id = %payload.session_id,
        event_type = %payload.event_type,
        events = session.events,
        "Event recorded"
    );

    Ok(Json(ApiResponse::ok(json!({
        "eventType": payload.event_type,
        "recorded": session.events,
    }))))
}

/// Handler for GET /v1/ad-request
///
/// Serves a deterministic creative for the requested format.
pub async fn ad_request_handler(
    State(state): State<SandboxState>,
    headers: HeaderMap,
    Query(params): Query<AdRequestParams>,
) -> Result<Json<ApiResponse<AdResponse>>> {
    state.authorize(&headers)?;
    params.validate()?;

    let country = params.country.to_lowercase();
    let ad_id = format!("ad_{}_{}", params.ad_type.as_str(), country);

    Ok(Json(ApiResponse::ok(AdResponse {
        campaign_id: format!("cmp_{}_{}", params.platform, country),
        content: AdContent {
            title: format!("Sandbox {} ad", params.ad_type.as_str()),
            description: format!("Served to {} on {}", params.device_id, params.platform),
            image_url: format!("https://cdn.sandbox.local/creatives/{ad_id}.png"),
        },
        ad_id,
    })))
}
