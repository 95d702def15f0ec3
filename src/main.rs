//! Polaris sandbox - local SDK backend for console development
//!
//! Serves the endpoints the console's SDK client consumes, so dashboards can
//! run against a live backend instead of the synthetic fallback.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use polaris_data::config::Config;
use polaris_data::sandbox::{create_router, shutdown_signal, SandboxState};

/// Main entry point for the sandbox backend.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create Axum router with all endpoints
/// 4. Start HTTP server on configured port
/// 5. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polaris_data=info,polaris_sandbox=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Polaris sandbox backend");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, base_url={}",
        config.sandbox_port, config.base_url
    );

    let app = create_router(SandboxState::from_config(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.sandbox_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Sandbox listening on http://{}/api", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Sandbox shutdown complete");
    Ok(())
}
