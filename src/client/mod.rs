//! Client Module
//!
//! Transport to the SDK backend. Every call resolves to an [`ApiResponse`]
//! envelope and never returns an error past this boundary.
//!
//! [`ApiResponse`]: crate::models::ApiResponse

mod http;
mod transport;

pub use http::SdkClient;
pub use transport::SdkTransport;

/// Header carrying the SDK key on every call.
pub const SDK_KEY_HEADER: &str = "X-SDK-Key";
