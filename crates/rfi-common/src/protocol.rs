//! JSON request/response shapes of the simulation API.
//!
//! Requests embed the validated records from [`crate::models`], so a body
//! that deserializes is already a valid scenario apart from cross-field
//! limits (sample count, grid length) checked by the handler.
//!
//! `service_type` stays a plain string: an unknown literal must still
//! produce a full response carrying a sentinel verdict.

use serde::{Deserialize, Serialize};

use crate::models::{BandParameters, ComplianceVerdict, DynamicInterferer, Interferer};

pub const DEFAULT_TIME_SAMPLES: usize = 10_000;

fn default_time_samples() -> usize {
    DEFAULT_TIME_SAMPLES
}

// ── Requests ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRequest {
    pub band_params: BandParameters,
    pub interferers: Vec<Interferer>,
    pub service_type: String,
    #[serde(default = "default_time_samples", alias = "sample_count")]
    pub time_samples: usize,
    /// Monte Carlo seed. A fresh one is drawn (and echoed back) when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Aggregate run against a named band preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetAggregateRequest {
    pub interferers: Vec<Interferer>,
    pub service_type: String,
    #[serde(default = "default_time_samples", alias = "sample_count")]
    pub time_samples: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicRequest {
    pub band_params: BandParameters,
    pub interferer: DynamicInterferer,
    pub service_type: String,
    pub duration_s: f64,
    pub time_step_s: f64,
}

// ── Responses ───────────────────────────────────────────────────────

/// Per-interferer single-entry contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryBreakdown {
    pub path_loss_db: f64,
    pub off_axis_gain_db: f64,
    pub interference_dbw: f64,
    pub epfd_dbw_m2_mhz: f64,
    pub ci_db: f64,
}

/// Empirical CCDF: `ccdf[i] = P(SNR loss > snr_loss_db[i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcdfCurve {
    pub snr_loss_db: Vec<f64>,
    pub ccdf: Vec<f64>,
}

/// Percentage of samples whose SNR loss exceeds 1, 3 and 6 dB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceedanceTable {
    #[serde(rename = "P_SNR_loss_gt_1dB_pct")]
    pub gt_1db_pct: f64,
    #[serde(rename = "P_SNR_loss_gt_3dB_pct")]
    pub gt_3db_pct: f64,
    #[serde(rename = "P_SNR_loss_gt_6dB_pct")]
    pub gt_6db_pct: f64,
}

/// Both fixed standards, always evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSet {
    #[serde(rename = "SA.1157")]
    pub sa1157: ComplianceVerdict,
    #[serde(rename = "SA.609")]
    pub sa609: ComplianceVerdict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub seed: u64,
    pub carrier_dbw: f64,
    pub noise_dbw: f64,
    pub baseline_snr_db: f64,
    pub i_aggregate_dbw: f64,
    pub ci_aggregate_db: f64,
    pub snr_with_interference_db: f64,
    pub snr_loss_db: f64,
    pub epfd_aggregate_dbw_m2_mhz: f64,
    pub entries: Vec<EntryBreakdown>,
    pub exceedance: ExceedanceTable,
    pub snr_loss_samples_db: Vec<f64>,
    pub ccdf: CcdfCurve,
    pub compliance: ComplianceSet,
    pub overall_compliance: ComplianceVerdict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetAggregateResponse {
    pub band: String,
    pub service: String,
    #[serde(flatten)]
    pub result: AggregateResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicResponse {
    pub baseline_snr_db: f64,
    pub time_s: Vec<f64>,
    pub snr_loss_db: Vec<f64>,
    pub peak_snr_loss_db: f64,
    pub overall_compliance: ComplianceVerdict,
}

/// Catalog listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandSummary {
    pub name: String,
    pub service: String,
    pub f_ghz: f64,
    pub d_km: f64,
    #[serde(rename = "EIRP_dbw")]
    pub eirp_dbw: f64,
    #[serde(rename = "G_rx_db")]
    pub g_rx_db: f64,
    pub theta_3db: f64,
    #[serde(rename = "T_sys_k")]
    pub t_sys_k: f64,
    #[serde(rename = "B_Hz")]
    pub bandwidth_hz: f64,
}
