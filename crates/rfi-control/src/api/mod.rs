//! REST API route tree.

pub mod bands;
pub mod error;
pub mod simulate;

use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

/// Build the API router. Mounted at the root by the binary.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/simulate", simulate::router())
        .nest("/bands", bands::router())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
