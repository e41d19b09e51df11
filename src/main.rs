// =============================================================================
// Stock Report Service — Main Entry Point
// =============================================================================
//
// Fetches daily price/volume series for Taiwan-listed tickers, repairs
// gaps, derives SMA/RSI/crossover indicators, and serves the enriched
// records as JSON or downloadable CSV.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod config;
mod csv_export;
mod indicators;
mod keep_alive;
mod pipeline;
mod yahoo;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    info!(
        bind_addr = %config.bind_addr,
        default_range = %config.stock_range,
        keep_alive = config.keep_alive.enabled,
        "stock report service starting"
    );

    // ── 2. Shared state ──────────────────────────────────────────────────
    let state = Arc::new(AppState::new(config.clone()));

    // ── 3. Keep-alive scheduler ──────────────────────────────────────────
    tokio::spawn(keep_alive::run(config.keep_alive.clone()));

    // ── 4. HTTP server ───────────────────────────────────────────────────
    let app = api::rest::router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {e}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "API server listening");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result.map_err(|e| anyhow::anyhow!("API server failed: {e}"))?;
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("shutdown signal received — stopping");
        }
    }

    info!("stock report service shut down complete");
    Ok(())
}
