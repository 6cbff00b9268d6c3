//! RFI compliance explorer HTTP service.
//!
//! Single binary serving the simulation API:
//! - aggregate Monte Carlo and dynamic pass simulations
//! - the band preset catalog
//! - a liveness check

use std::net::SocketAddr;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use rfi_control::config::ServiceConfig;
use rfi_control::{api, state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ─────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Config ──────────────────────────────────────────────────
    let config = match std::env::var("RFI_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            tracing::info!(path = %path, "loaded config");
            ServiceConfig::from_toml_str(&text)?
        }
        Err(_) => ServiceConfig::default(),
    };

    // ── Shared state ────────────────────────────────────────────
    let state = state::AppState::new(&config);
    tracing::info!(
        bands = state.registry().len(),
        max_samples = config.limits.max_samples,
        max_grid_points = config.limits.max_grid_points,
        "band catalog ready"
    );

    // ── Router ──────────────────────────────────────────────────
    let app = api::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // ── Listen ──────────────────────────────────────────────────
    let addr: SocketAddr = match std::env::var("LISTEN_ADDR") {
        Ok(addr) => addr.parse()?,
        Err(_) => config.listen_addr,
    };

    tracing::info!("rfi-control listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
