//! Request DTOs for the SDK backend
//!
//! Defines the payloads the transport client sends.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Device platform reported by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Web,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device metadata sent with `POST /v1/init`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_id: String,
    pub platform: Platform,
    pub os_version: String,
    pub device_model: String,
    pub app_version: String,
    pub sdk_version: String,
    pub advertising_id: String,
    pub country: String,
}

impl DeviceInfo {
    /// Checks the fields the backend needs to open a session.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.device_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("deviceId"));
        }
        if self.app_version.trim().is_empty() {
            return Err(ValidationError::EmptyField("appVersion"));
        }
        if self.sdk_version.trim().is_empty() {
            return Err(ValidationError::EmptyField("sdkVersion"));
        }
        Ok(())
    }
}

/// Kind of event reported to `POST /v1/track`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Impression,
    Click,
    Install,
    Reward,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::Impression => "impression",
            EventType::Click => "click",
            EventType::Install => "install",
            EventType::Reward => "reward",
        };
        f.write_str(name)
    }
}

/// Body of `POST /v1/track`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEventPayload {
    pub event_type: EventType,
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_id: Option<String>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_first_session: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_nonce: Option<String>,
}

impl TrackEventPayload {
    /// Bare event with only the required fields set.
    pub fn new(
        event_type: EventType,
        device_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            event_type,
            device_id: device_id.into(),
            campaign_id: None,
            ad_id: None,
            session_id: session_id.into(),
            is_first_session: None,
            reward_type: None,
            reward_amount: None,
            validation_nonce: None,
        }
    }

    /// Attaches the campaign and creative the event refers to.
    pub fn with_ad(mut self, campaign_id: impl Into<String>, ad_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self.ad_id = Some(ad_id.into());
        self
    }
}

/// Ad format requested from `GET /v1/ad-request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdType {
    Rewarded,
    Interstitial,
    Banner,
}

impl AdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdType::Rewarded => "rewarded",
            AdType::Interstitial => "interstitial",
            AdType::Banner => "banner",
        }
    }
}

/// Query parameters of `GET /v1/ad-request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRequestParams {
    pub device_id: String,
    pub ad_type: AdType,
    pub platform: Platform,
    pub country: String,
}

impl AdRequestParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.device_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("deviceId"));
        }
        if self.country.trim().is_empty() {
            return Err(ValidationError::EmptyField("country"));
        }
        Ok(())
    }
}
