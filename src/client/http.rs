//! HTTP transport client
//!
//! reqwest-backed implementation of [`SdkTransport`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

use super::{SdkTransport, SDK_KEY_HEADER};
use crate::config::Config;
use crate::error::{TransportError, TransportResult};
use crate::models::{
    AdRequestParams, AdResponse, ApiResponse, DeviceInfo, EventType, HealthCheckResponse,
    SdkInitResponse, TrackEventPayload,
};

const USER_AGENT: &str = concat!("polaris-data/", env!("CARGO_PKG_VERSION"));

/// Client for the SDK backend.
///
/// Holds the session id handed out by the last successful [`init`] call;
/// that is the only state any call mutates.
///
/// [`init`]: SdkTransport::init
#[derive(Debug)]
pub struct SdkClient {
    http: Client,
    base_url: String,
    sdk_key: String,
    session_id: RwLock<Option<String>>,
}

impl SdkClient {
    /// Creates a client for `base_url`, authenticating with `sdk_key`.
    pub fn new(base_url: impl Into<String>, sdk_key: impl Into<String>) -> TransportResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(base_url = %base_url, "SDK client initialized");

        Ok(Self {
            http,
            base_url,
            sdk_key: sdk_key.into(),
            session_id: RwLock::new(None),
        })
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> TransportResult<Self> {
        Self::new(config.base_url.clone(), config.sdk_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session id of the last successful initialization, if any.
    pub async fn session_id(&self) -> Option<String> {
        self.session_id.read().await.clone()
    }

    pub async fn set_session_id(&self, session_id: impl Into<String>) {
        *self.session_id.write().await = Some(session_id.into());
    }

    async fn current_session(&self) -> String {
        self.session_id().await.unwrap_or_default()
    }

    // == Convenience Tracking ==

    /// Reports an ad impression under the current session.
    pub async fn track_impression(
        &self,
        device_id: &str,
        campaign_id: &str,
        ad_id: &str,
    ) -> ApiResponse<Value> {
        let payload = TrackEventPayload::new(
            EventType::Impression,
            device_id,
            self.current_session().await,
        )
        .with_ad(campaign_id, ad_id);
        self.track_event(&payload).await
    }

    /// Reports an ad click under the current session.
    pub async fn track_click(
        &self,
        device_id: &str,
        campaign_id: &str,
        ad_id: &str,
    ) -> ApiResponse<Value> {
        let payload =
            TrackEventPayload::new(EventType::Click, device_id, self.current_session().await)
                .with_ad(campaign_id, ad_id);
        self.track_event(&payload).await
    }

    /// Reports an app install under the current session.
    pub async fn track_install(&self, device_id: &str, is_first_session: bool) -> ApiResponse<Value> {
        let mut payload =
            TrackEventPayload::new(EventType::Install, device_id, self.current_session().await);
        payload.is_first_session = Some(is_first_session);
        self.track_event(&payload).await
    }

    /// Reports a granted reward under the current session.
    pub async fn track_reward(
        &self,
        device_id: &str,
        campaign_id: &str,
        ad_id: &str,
        reward_type: &str,
        reward_amount: f64,
        validation_nonce: &str,
    ) -> ApiResponse<Value> {
        let mut payload =
            TrackEventPayload::new(EventType::Reward, device_id, self.current_session().await)
                .with_ad(campaign_id, ad_id);
        payload.reward_type = Some(reward_type.to_string());
        payload.reward_amount = Some(reward_amount);
        payload.validation_nonce = Some(validation_nonce.to_string());
        self.track_event(&payload).await
    }

    // == Request Plumbing ==

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Sends the request and folds every failure into the envelope.
    async fn request<T: DeserializeOwned>(&self, endpoint: &str, builder: RequestBuilder) -> ApiResponse<T> {
        match self.send(builder).await {
            Ok(data) => ApiResponse::ok(data),
            Err(err) => {
                error!(endpoint, error = %err, "SDK request failed");
                ApiResponse::err(err.to_string())
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> TransportResult<T> {
        let response = builder.header(SDK_KEY_HEADER, &self.sdk_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body: Value = response.json().await?;
        unwrap_envelope(body)
    }
}

#[async_trait]
impl SdkTransport for SdkClient {
    #[instrument(skip(self))]
    async fn health_check(&self) -> ApiResponse<HealthCheckResponse> {
        let builder = self.http.get(self.url("/health"));
        self.request::<Value>("/health", builder)
            .await
            .map(HealthCheckResponse::from_body)
    }

    #[instrument(skip(self, device), fields(device_id = %device.device_id, platform = %device.platform))]
    async fn init(&self, device: &DeviceInfo) -> ApiResponse<SdkInitResponse> {
        if let Err(err) = device.validate() {
            warn!(error = %err, "Refusing to initialize with invalid device info");
            return ApiResponse::from(Err(TransportError::from(err)));
        }

        let builder = self.http.post(self.url("/v1/init")).json(device);
        let response: ApiResponse<SdkInitResponse> = self.request("/v1/init", builder).await;

        if let Some(data) = response.data.as_ref().filter(|_| response.success) {
            info!(session_id = %data.session_id, "SDK session established");
            self.set_session_id(data.session_id.clone()).await;
        }

        response
    }

    #[instrument(skip(self, payload), fields(event_type = %payload.event_type))]
    async fn track_event(&self, payload: &TrackEventPayload) -> ApiResponse<Value> {
        let builder = self.http.post(self.url("/v1/track")).json(payload);
        self.request("/v1/track", builder).await
    }

    #[instrument(skip(self, params), fields(ad_type = params.ad_type.as_str()))]
    async fn request_ad(&self, params: &AdRequestParams) -> ApiResponse<AdResponse> {
        if let Err(err) = params.validate() {
            return ApiResponse::from(Err(TransportError::from(err)));
        }

        let builder = self.http.get(self.url("/v1/ad-request")).query(&[
            ("deviceId", params.device_id.as_str()),
            ("adType", params.ad_type.as_str()),
            ("platform", params.platform.as_str()),
            ("country", params.country.as_str()),
        ]);
        self.request("/v1/ad-request", builder).await
    }
}

/// Extracts the payload from a decoded response body.
///
/// `{success: false}` is an application-level failure; a non-null `data`
/// field is the payload; anything else is taken as the payload itself.
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(body: Value) -> TransportResult<T> {
    let payload = match body {
        Value::Object(mut map) => {
            if map.get("success") == Some(&Value::Bool(false)) {
                let message = map
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("Request failed")
                    .to_string();
                return Err(TransportError::Rejected(message));
            }
            if map.get("data").is_some_and(|data| !data.is_null()) {
                map.remove("data").unwrap_or_default()
            } else {
                Value::Object(map)
            }
        }
        other => other,
    };

    debug!("Decoding response payload");
    serde_json::from_value(payload).map_err(|e| TransportError::Decode(e.to_string()))
}
