//! Runs the Trellis HTTP server.
//!
//! Usage:
//!
//! ```text
//! trellis
//! ```
//!
//! Configuration is read from `trellis.toml` (or the file named by
//! `TRELLIS_CONFIG`) and `TRELLIS_`-prefixed environment variables, for
//! example `TRELLIS_SERVER__BIND=0.0.0.0:8080`. Logging honours `RUST_LOG`.

use tracing::info;
use trellis::config::TrellisConfig;
use trellis::http::{AppState, router};
use trellis::telemetry;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = TrellisConfig::load()?;
    telemetry::init(&config.bootstrap.log_filter)?;

    let state = AppState::from_config(&config)?;
    let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
    info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}
