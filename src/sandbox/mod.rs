//! Sandbox Module
//!
//! Local backend implementing the REST shape the SDK client consumes, for
//! development and integration tests.
//!
//! # Endpoints (under `/api`)
//! - `GET /health` - Health check endpoint
//! - `POST /v1/init` - Open an SDK session
//! - `POST /v1/track` - Record an event
//! - `GET /v1/ad-request` - Serve an ad

pub mod handlers;
pub mod routes;
pub mod shutdown;

pub use handlers::{SandboxState, SessionRecord};
pub use routes::create_router;
pub use shutdown::shutdown_signal;
