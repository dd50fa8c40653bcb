//! # fort-api: Binary Entry Point
//!
//! Loads configuration, the model, and the signing key, then serves the
//! HTTP API. Any startup failure exits non-zero before the port is bound.

use fort_api::config::AppConfig;
use fort_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration invalid: {e}");
        e
    })?;
    tracing::info!(?config, "configuration loaded");
    let port = config.port;

    let state = AppState::from_config(config).map_err(|e| {
        tracing::error!("Startup failed: {e}");
        e
    })?;

    let app = fort_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("FORT API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
