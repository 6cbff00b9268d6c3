//! Band preset endpoints.
//!
//! GET  /bands                    list the preset catalog
//! POST /bands/{name}/aggregate   aggregate run against a named preset

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use rfi_common::presets::BandPreset;
use rfi_common::protocol::{BandSummary, PresetAggregateRequest, PresetAggregateResponse};

use crate::api::error::{ApiError, ApiJson};
use crate::api::simulate::{check_samples, resolve_seed, run_aggregate_blocking};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bands))
        .route("/{name}/aggregate", post(preset_aggregate))
}

fn summary(p: &BandPreset) -> BandSummary {
    BandSummary {
        name: p.name.clone(),
        service: p.service.clone(),
        f_ghz: p.band.f_ghz(),
        d_km: p.band.d_km(),
        eirp_dbw: p.band.eirp_dbw(),
        g_rx_db: p.band.g_rx_db(),
        theta_3db: p.band.theta_3db(),
        t_sys_k: p.noise.t_sys_k(),
        bandwidth_hz: p.noise.bandwidth_hz(),
    }
}

// ── List ────────────────────────────────────────────────────────────

async fn list_bands(State(state): State<AppState>) -> Json<Vec<BandSummary>> {
    Json(state.registry().iter().map(summary).collect())
}

// ── Preset Aggregate ────────────────────────────────────────────────

async fn preset_aggregate(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiJson(body): ApiJson<PresetAggregateRequest>,
) -> Result<Json<PresetAggregateResponse>, ApiError> {
    let preset = state.registry().get(&name).cloned().ok_or_else(|| {
        tracing::warn!(band = %name, "unknown band preset");
        ApiError::not_found(format!("unknown band preset: {name}"))
    })?;
    check_samples(state.limits(), body.time_samples)?;
    let seed = resolve_seed(body.seed);

    tracing::info!(
        band = %preset.name,
        interferers = body.interferers.len(),
        time_samples = body.time_samples,
        seed,
        "preset aggregate requested"
    );

    // The preset's own receiver noise drives N and the epfd bandwidth.
    let settings = state.engine().with_noise(preset.noise);
    let result = run_aggregate_blocking(
        preset.band,
        body.interferers,
        body.service_type,
        body.time_samples,
        seed,
        settings,
    )
    .await?;

    Ok(Json(PresetAggregateResponse {
        band: preset.name,
        service: preset.service,
        result,
    }))
}
