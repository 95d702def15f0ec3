//! Response DTOs for the SDK backend
//!
//! Payloads carried inside the `data` field of the envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend health as reported by `GET /health`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    /// Status string this client does not recognise, or none at all
    #[default]
    #[serde(other)]
    Unknown,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckResponse {
    pub status: HealthStatus,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthCheckResponse {
    /// Creates a healthy response stamped with the current time
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Reads whatever JSON a backend answered its health route with.
    ///
    /// Any parsed body counts as a reply; fields that are missing or
    /// shaped differently fall back to their defaults.
    pub fn from_body(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }
}

/// Per-session configuration handed out by `POST /v1/init`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
    pub validation_nonce: String,
}

/// Response body for SDK initialization (POST /v1/init)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkInitResponse {
    pub session_id: String,
    pub config: SdkConfig,
}

/// Creative shown for a served ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdContent {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

/// Response body for an ad request (GET /v1/ad-request)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdResponse {
    pub ad_id: String,
    pub campaign_id: String,
    pub content: AdContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthCheckResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_health_unknown_status() {
        let json = r#"{"status":"ok","timestamp":"2026-01-01T00:00:00Z"}"#;
        let resp: HealthCheckResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, HealthStatus::Unknown);
        assert_eq!(resp.timestamp, "2026-01-01T00:00:00Z");
    }

    #[test]
    fn test_health_from_any_body() {
        let resp = HealthCheckResponse::from_body(serde_json::json!({"uptime": 12}));
        assert_eq!(resp.status, HealthStatus::Unknown);
        assert!(resp.timestamp.is_empty());

        let resp = HealthCheckResponse::from_body(serde_json::json!("OK"));
        assert_eq!(resp, HealthCheckResponse::default());

        let resp = HealthCheckResponse::from_body(serde_json::json!({"status": "unhealthy"}));
        assert_eq!(resp.status, HealthStatus::Unhealthy);
    }

    #[test]
    fn test_init_response_deserialize() {
        let json = r#"{"sessionId":"sess_1","config":{"validationNonce":"n1"}}"#;
        let resp: SdkInitResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.session_id, "sess_1");
        assert_eq!(resp.config.validation_nonce, "n1");
    }

    #[test]
    fn test_ad_response_camel_case() {
        let resp = AdResponse {
            ad_id: "ad_1".to_string(),
            campaign_id: "cmp_1".to_string(),
            content: AdContent {
                title: "t".to_string(),
                description: "d".to_string(),
                image_url: "https://cdn.example/1.png".to_string(),
            },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["adId"], "ad_1");
        assert_eq!(json["content"]["imageUrl"], "https://cdn.example/1.png");
    }
}
