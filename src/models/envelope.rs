//! Response envelope
//!
//! The `{success, data?, error?}` wrapper every transport call resolves to.

use serde::{Deserialize, Serialize};

use crate::error::TransportResult;

/// Uniform outcome of a remote call.
///
/// `success == false` means `data` is not to be trusted; `error` then holds
/// the rendered failure message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed envelope carrying an error message.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Returns the error message, or `default` when the failure carried none.
    pub fn error_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.error.as_deref().unwrap_or(default)
    }

    /// Maps the payload, keeping the success flag and error untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
        }
    }
}

impl<T> From<TransportResult<T>> for ApiResponse<T> {
    fn from(result: TransportResult<T>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(err) => ApiResponse::err(err.to_string()),
        }
    }
}
