//! Simulation endpoints.
//!
//! POST /simulate/aggregate   Monte Carlo aggregate scenario
//! POST /simulate/dynamic     deterministic single-interferer pass
//!
//! Engine calls run on the blocking pool; request sizes are checked
//! against the configured limits first.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use rfi_common::models::{BandParameters, Interferer};
use rfi_common::protocol::{
    AggregateRequest, AggregateResponse, CcdfCurve, ComplianceSet, DynamicRequest,
    DynamicResponse, EntryBreakdown, ExceedanceTable,
};
use rfi_engine::dynamic_pass::TimeGrid;
use rfi_engine::scenario::{self, AggregateOutcome, AggregateScenario};
use rfi_engine::EngineSettings;

use crate::api::error::{ApiError, ApiJson};
use crate::config::Limits;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/aggregate", post(aggregate))
        .route("/dynamic", post(dynamic))
}

// ── Shared helpers ──────────────────────────────────────────────────

pub(crate) fn check_samples(limits: Limits, time_samples: usize) -> Result<(), ApiError> {
    if time_samples > limits.max_samples {
        return Err(ApiError::bad_request(format!(
            "time_samples {time_samples} exceeds the limit of {}",
            limits.max_samples
        )));
    }
    Ok(())
}

/// Use the caller's seed or draw a fresh one so the run can be replayed.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random())
}

/// One aggregate run on the blocking pool, seeded with `seed`.
pub(crate) async fn run_aggregate_blocking(
    band: BandParameters,
    interferers: Vec<Interferer>,
    service_type: String,
    time_samples: usize,
    seed: u64,
    settings: EngineSettings,
) -> Result<AggregateResponse, ApiError> {
    let outcome = tokio::task::spawn_blocking(move || {
        let scenario = AggregateScenario {
            band: &band,
            interferers: &interferers,
            service_type: &service_type,
            sample_count: time_samples,
        };
        scenario::run_aggregate(&scenario, &settings, &mut StdRng::seed_from_u64(seed))
    })
    .await??;
    Ok(aggregate_response(seed, outcome))
}

fn aggregate_response(seed: u64, outcome: AggregateOutcome) -> AggregateResponse {
    let AggregateOutcome {
        link,
        aggregate,
        samples,
        ccdf,
        exceedance,
        compliance,
    } = outcome;

    let entries = aggregate
        .entries
        .iter()
        .map(|e| EntryBreakdown {
            path_loss_db: e.path_loss_db,
            off_axis_gain_db: e.off_axis_gain_db,
            interference_dbw: e.interference_dbw,
            epfd_dbw_m2_mhz: e.epfd_dbw_m2_mhz,
            ci_db: link.carrier_dbw - e.interference_dbw,
        })
        .collect();

    AggregateResponse {
        seed,
        carrier_dbw: link.carrier_dbw,
        noise_dbw: link.noise_dbw,
        baseline_snr_db: link.baseline_snr_db,
        i_aggregate_dbw: aggregate.i_aggregate_dbw,
        ci_aggregate_db: aggregate.ci_aggregate_db,
        snr_with_interference_db: aggregate.snr_with_interference_db,
        snr_loss_db: aggregate.snr_loss_db,
        epfd_aggregate_dbw_m2_mhz: aggregate.epfd_aggregate_dbw_m2_mhz,
        entries,
        exceedance: ExceedanceTable {
            gt_1db_pct: exceedance.gt_1db_pct,
            gt_3db_pct: exceedance.gt_3db_pct,
            gt_6db_pct: exceedance.gt_6db_pct,
        },
        snr_loss_samples_db: samples.into_vec(),
        ccdf: CcdfCurve {
            snr_loss_db: ccdf.x,
            ccdf: ccdf.fraction,
        },
        compliance: ComplianceSet {
            sa1157: compliance.sa1157,
            sa609: compliance.sa609,
        },
        overall_compliance: compliance.overall,
    }
}

// ── Aggregate ───────────────────────────────────────────────────────

async fn aggregate(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AggregateRequest>,
) -> Result<Json<AggregateResponse>, ApiError> {
    check_samples(state.limits(), body.time_samples)?;
    let seed = resolve_seed(body.seed);

    tracing::info!(
        interferers = body.interferers.len(),
        time_samples = body.time_samples,
        service_type = %body.service_type,
        seed,
        "aggregate simulation requested"
    );

    let resp = run_aggregate_blocking(
        body.band_params,
        body.interferers,
        body.service_type,
        body.time_samples,
        seed,
        *state.engine(),
    )
    .await?;
    Ok(Json(resp))
}

// ── Dynamic ─────────────────────────────────────────────────────────

async fn dynamic(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<DynamicRequest>,
) -> Result<Json<DynamicResponse>, ApiError> {
    let grid = TimeGrid::new(body.duration_s, body.time_step_s)?;
    let max = state.limits().max_grid_points;
    if grid.len() > max {
        return Err(ApiError::bad_request(format!(
            "time grid of {} points exceeds the limit of {max}",
            grid.len()
        )));
    }

    tracing::info!(
        points = grid.len(),
        service_type = %body.service_type,
        "dynamic pass requested"
    );

    let settings = *state.engine();
    let outcome = tokio::task::spawn_blocking(move || {
        scenario::run_dynamic(
            &body.band_params,
            &body.interferer,
            &grid,
            &body.service_type,
            &settings,
        )
    })
    .await??;

    let peak_snr_loss_db = outcome.series.peak_snr_loss_db();
    Ok(Json(DynamicResponse {
        baseline_snr_db: outcome.link.baseline_snr_db,
        time_s: outcome.series.time_s,
        snr_loss_db: outcome.series.snr_loss_db,
        peak_snr_loss_db,
        overall_compliance: outcome.overall,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_limit_is_inclusive() {
        let limits = Limits {
            max_samples: 100,
            max_grid_points: 10,
        };
        assert!(check_samples(limits, 100).is_ok());
        assert!(check_samples(limits, 101).is_err());
    }

    #[test]
    fn explicit_seed_is_kept() {
        assert_eq!(resolve_seed(Some(7)), 7);
    }
}
