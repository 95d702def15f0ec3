//! Configuration Module
//!
//! Handles loading client and sandbox configuration from environment variables.

use std::env;

/// Default base URL of the SDK backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Placeholder SDK key used when none is configured.
pub const DEFAULT_SDK_KEY: &str = "your-sdk-key-here";

/// Default port for the local sandbox backend.
pub const DEFAULT_SANDBOX_PORT: u16 = 3000;

/// Client and sandbox configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every transport call is issued against
    pub base_url: String,
    /// Value sent in the `X-SDK-Key` header
    pub sdk_key: String,
    /// Port the sandbox backend listens on
    pub sandbox_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POLARIS_API_BASE_URL` - Backend base URL (default: `http://localhost:3000/api`)
    /// - `POLARIS_SDK_KEY` - SDK key header value (default: `your-sdk-key-here`)
    /// - `SANDBOX_PORT` - Sandbox HTTP port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("POLARIS_API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            sdk_key: env::var("POLARIS_SDK_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SDK_KEY.to_string()),
            sandbox_port: env::var("SANDBOX_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SANDBOX_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sdk_key: DEFAULT_SDK_KEY.to_string(),
            sandbox_port: DEFAULT_SANDBOX_PORT,
        }
    }
}
