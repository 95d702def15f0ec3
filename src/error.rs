//! Error types for the data layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Transport Error Enum ==
/// Every way a remote call can fail before it reaches the envelope.
///
/// All variants collapse into `{success: false, error: <message>}` at the
/// client boundary, so callers only ever see the rendered message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout
    #[error("{0}")]
    Network(String),

    /// Server answered outside the 2xx range
    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },

    /// Body could not be parsed into the expected payload
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Envelope carried `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Request failed local validation and was never sent
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

// == Validation Error Enum ==
/// Constraint violations on outgoing request payloads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Field '{0}' cannot be empty")]
    EmptyField(&'static str),

    #[error("Unsupported {field}: {value}")]
    Unsupported { field: &'static str, value: String },
}

// == Sandbox Error Enum ==
/// Errors returned by the local sandbox backend.
#[derive(Error, Debug)]
pub enum SandboxError {
    /// Missing or wrong `X-SDK-Key`
    #[error("Invalid SDK key")]
    Unauthorized,

    /// Request data failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Session id not issued by this sandbox
    #[error("Unknown session: {0}")]
    UnknownSession(String),
}

impl From<ValidationError> for SandboxError {
    fn from(err: ValidationError) -> Self {
        SandboxError::InvalidRequest(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for SandboxError {
    fn into_response(self) -> Response {
        let status = match &self {
            SandboxError::Unauthorized => StatusCode::UNAUTHORIZED,
            SandboxError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SandboxError::UnknownSession(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Result of a single transport call before envelope conversion.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Convenience Result type for sandbox handlers.
pub type Result<T> = std::result::Result<T, SandboxError>;
