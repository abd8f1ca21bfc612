use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hiclimate_query::QueryEngine;
use hiclimate_store::SqliteDataset;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Observability
    hiclimate_obs::init("hiclimate");

    // Config
    let cfg = hiclimate_config::AppConfig::load().context("Failed to load configuration")?;
    let http_bind = cfg.http_bind();
    let dataset_path = cfg.dataset_path();

    // Dataset is loaded once; any failure here is fatal
    tracing::info!(path = %dataset_path.display(), "Loading dataset");
    let store = SqliteDataset::open(&dataset_path)
        .and_then(|dataset| dataset.load())
        .with_context(|| format!("Failed to load dataset {}", dataset_path.display()))?;
    tracing::info!(
        stations = store.station_count(),
        measurements = store.measurement_count(),
        "Dataset ready"
    );

    let engine = QueryEngine::new(Arc::new(store));
    let (app, state) = hiclimate_api::build_app(engine)?;

    let addr: SocketAddr = http_bind
        .parse()
        .with_context(|| format!("Invalid HTTP bind address {http_bind}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind TCP listener")?;

    // Mark ready just before serving
    hiclimate_api::set_ready(&state, true);

    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error=?e, "failed to listen for shutdown signal");
    }
}
