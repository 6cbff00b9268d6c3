//! Immutable, validated value records.
//!
//! Each record deserializes through a raw `*Input` shape and is validated in
//! `TryFrom`, so an invalid record never exists past the JSON boundary.
//! Field names on the wire follow the link-budget notation used by the
//! dashboard (`EIRP_dbw`, `G_rx_db`, ...).

use serde::{Deserialize, Serialize};

use crate::error::{self, ValidationError};

pub const DEFAULT_SIGMA_DB: f64 = 4.0;
pub const DEFAULT_DUTY_CYCLE: f64 = 1.0;
pub const DEFAULT_T_SYS_K: f64 = 250.0;
pub const DEFAULT_BANDWIDTH_HZ: f64 = 1e6;

// ── Band Parameters ─────────────────────────────────────────────────

/// Wanted-link parameters for one band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BandParametersInput")]
pub struct BandParameters {
    f_ghz: f64,
    d_km: f64,
    #[serde(rename = "EIRP_dbw")]
    eirp_dbw: f64,
    #[serde(rename = "G_rx_db")]
    g_rx_db: f64,
    theta_3db: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BandParametersInput {
    pub f_ghz: f64,
    pub d_km: f64,
    #[serde(rename = "EIRP_dbw")]
    pub eirp_dbw: f64,
    #[serde(rename = "G_rx_db")]
    pub g_rx_db: f64,
    pub theta_3db: f64,
}

impl BandParameters {
    pub fn new(
        f_ghz: f64,
        d_km: f64,
        eirp_dbw: f64,
        g_rx_db: f64,
        theta_3db: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            f_ghz: error::positive("f_ghz", f_ghz)?,
            d_km: error::positive("d_km", d_km)?,
            eirp_dbw: error::finite("EIRP_dbw", eirp_dbw)?,
            g_rx_db: error::finite("G_rx_db", g_rx_db)?,
            theta_3db: error::positive("theta_3db", theta_3db)?,
        })
    }

    /// Build from values already known to pass [`BandParameters::new`].
    pub(crate) const fn trusted(
        f_ghz: f64,
        d_km: f64,
        eirp_dbw: f64,
        g_rx_db: f64,
        theta_3db: f64,
    ) -> Self {
        Self {
            f_ghz,
            d_km,
            eirp_dbw,
            g_rx_db,
            theta_3db,
        }
    }

    /// Frequency in GHz.
    pub fn f_ghz(&self) -> f64 {
        self.f_ghz
    }

    /// Wanted-link distance in km.
    pub fn d_km(&self) -> f64 {
        self.d_km
    }

    pub fn eirp_dbw(&self) -> f64 {
        self.eirp_dbw
    }

    /// Receive antenna boresight gain.
    pub fn g_rx_db(&self) -> f64 {
        self.g_rx_db
    }

    /// Receive antenna 3 dB beamwidth in degrees.
    pub fn theta_3db(&self) -> f64 {
        self.theta_3db
    }
}

impl TryFrom<BandParametersInput> for BandParameters {
    type Error = ValidationError;

    fn try_from(raw: BandParametersInput) -> Result<Self, Self::Error> {
        Self::new(raw.f_ghz, raw.d_km, raw.eirp_dbw, raw.g_rx_db, raw.theta_3db)
    }
}

// ── Static Interferer ───────────────────────────────────────────────

/// One unwanted emitter in an aggregate scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InterfererInput")]
pub struct Interferer {
    #[serde(rename = "EIRP_int_dbw")]
    eirp_dbw: f64,
    d_km: f64,
    theta_off_axis_deg: f64,
    sigma_db: f64,
    duty_cycle: f64,
    misc_loss_db: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterfererInput {
    #[serde(rename = "EIRP_int_dbw")]
    pub eirp_dbw: f64,
    pub d_km: f64,
    pub theta_off_axis_deg: f64,
    #[serde(default = "default_sigma_db")]
    pub sigma_db: f64,
    #[serde(default = "default_duty_cycle")]
    pub duty_cycle: f64,
    #[serde(default)]
    pub misc_loss_db: f64,
}

fn default_sigma_db() -> f64 {
    DEFAULT_SIGMA_DB
}

fn default_duty_cycle() -> f64 {
    DEFAULT_DUTY_CYCLE
}

impl Interferer {
    /// Interferer with the default statistics (σ = 4 dB, always on).
    pub fn new(eirp_dbw: f64, d_km: f64, theta_off_axis_deg: f64) -> Result<Self, ValidationError> {
        Self::with_statistics(
            eirp_dbw,
            d_km,
            theta_off_axis_deg,
            DEFAULT_SIGMA_DB,
            DEFAULT_DUTY_CYCLE,
        )
    }

    pub fn with_statistics(
        eirp_dbw: f64,
        d_km: f64,
        theta_off_axis_deg: f64,
        sigma_db: f64,
        duty_cycle: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            eirp_dbw: error::finite("EIRP_int_dbw", eirp_dbw)?,
            d_km: error::positive("d_km", d_km)?,
            theta_off_axis_deg: error::non_negative("theta_off_axis_deg", theta_off_axis_deg)?,
            sigma_db: error::non_negative("sigma_db", sigma_db)?,
            duty_cycle: error::in_range("duty_cycle", duty_cycle, 0.0, 1.0)?,
            misc_loss_db: 0.0,
        })
    }

    /// Adds a fixed miscellaneous loss (polarisation, implementation)
    /// applied to this entry's interference power.
    pub fn with_misc_loss(mut self, misc_loss_db: f64) -> Result<Self, ValidationError> {
        self.misc_loss_db = error::non_negative("misc_loss_db", misc_loss_db)?;
        Ok(self)
    }

    pub fn eirp_dbw(&self) -> f64 {
        self.eirp_dbw
    }

    pub fn d_km(&self) -> f64 {
        self.d_km
    }

    pub fn theta_off_axis_deg(&self) -> f64 {
        self.theta_off_axis_deg
    }

    /// Log-domain standard deviation of the interference power.
    pub fn sigma_db(&self) -> f64 {
        self.sigma_db
    }

    /// Fraction of time the emitter transmits.
    pub fn duty_cycle(&self) -> f64 {
        self.duty_cycle
    }

    pub fn misc_loss_db(&self) -> f64 {
        self.misc_loss_db
    }
}

impl TryFrom<InterfererInput> for Interferer {
    type Error = ValidationError;

    fn try_from(raw: InterfererInput) -> Result<Self, Self::Error> {
        Self::with_statistics(
            raw.eirp_dbw,
            raw.d_km,
            raw.theta_off_axis_deg,
            raw.sigma_db,
            raw.duty_cycle,
        )?
        .with_misc_loss(raw.misc_loss_db)
    }
}

// ── Moving Interferer ───────────────────────────────────────────────

/// Kinematics of a single interferer sweeping past the receive beam.
///
/// Off-axis angle and range both evolve linearly:
/// `θ(t) = θ0 + ω·t`, `d(t) = d0 + v·t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DynamicInterfererInput")]
pub struct DynamicInterferer {
    #[serde(rename = "EIRP_int_dbw")]
    eirp_dbw: f64,
    d0_km: f64,
    v_km_s: f64,
    theta0_deg: f64,
    omega_deg_s: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DynamicInterfererInput {
    #[serde(rename = "EIRP_int_dbw")]
    pub eirp_dbw: f64,
    pub d0_km: f64,
    pub v_km_s: f64,
    pub theta0_deg: f64,
    pub omega_deg_s: f64,
}

impl DynamicInterferer {
    pub fn new(
        eirp_dbw: f64,
        d0_km: f64,
        v_km_s: f64,
        theta0_deg: f64,
        omega_deg_s: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            eirp_dbw: error::finite("EIRP_int_dbw", eirp_dbw)?,
            d0_km: error::positive("d0_km", d0_km)?,
            v_km_s: error::finite("v_km_s", v_km_s)?,
            theta0_deg: error::finite("theta0_deg", theta0_deg)?,
            omega_deg_s: error::finite("omega_deg_s", omega_deg_s)?,
        })
    }

    pub fn eirp_dbw(&self) -> f64 {
        self.eirp_dbw
    }

    pub fn d0_km(&self) -> f64 {
        self.d0_km
    }

    /// Radial rate in km/s; negative while approaching.
    pub fn v_km_s(&self) -> f64 {
        self.v_km_s
    }

    pub fn theta0_deg(&self) -> f64 {
        self.theta0_deg
    }

    pub fn omega_deg_s(&self) -> f64 {
        self.omega_deg_s
    }

    /// Range at time `t_s`.
    pub fn distance_at(&self, t_s: f64) -> f64 {
        self.d0_km + self.v_km_s * t_s
    }

    /// Off-axis angle at time `t_s`.
    pub fn angle_at(&self, t_s: f64) -> f64 {
        self.theta0_deg + self.omega_deg_s * t_s
    }
}

impl TryFrom<DynamicInterfererInput> for DynamicInterferer {
    type Error = ValidationError;

    fn try_from(raw: DynamicInterfererInput) -> Result<Self, Self::Error> {
        Self::new(
            raw.eirp_dbw,
            raw.d0_km,
            raw.v_km_s,
            raw.theta0_deg,
            raw.omega_deg_s,
        )
    }
}

// ── Receiver Noise ──────────────────────────────────────────────────

/// System noise temperature and receiver bandwidth used for `N = kTB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NoiseParametersInput")]
pub struct NoiseParameters {
    t_sys_k: f64,
    bandwidth_hz: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoiseParametersInput {
    pub t_sys_k: f64,
    pub bandwidth_hz: f64,
}

impl NoiseParameters {
    pub fn new(t_sys_k: f64, bandwidth_hz: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            t_sys_k: error::positive("t_sys_k", t_sys_k)?,
            bandwidth_hz: error::positive("bandwidth_hz", bandwidth_hz)?,
        })
    }

    /// Build from values already known to pass [`NoiseParameters::new`].
    pub(crate) const fn trusted(t_sys_k: f64, bandwidth_hz: f64) -> Self {
        Self {
            t_sys_k,
            bandwidth_hz,
        }
    }

    pub fn t_sys_k(&self) -> f64 {
        self.t_sys_k
    }

    pub fn bandwidth_hz(&self) -> f64 {
        self.bandwidth_hz
    }

    pub fn bandwidth_mhz(&self) -> f64 {
        self.bandwidth_hz / 1e6
    }
}

impl Default for NoiseParameters {
    /// 250 K over 1 MHz.
    fn default() -> Self {
        Self {
            t_sys_k: DEFAULT_T_SYS_K,
            bandwidth_hz: DEFAULT_BANDWIDTH_HZ,
        }
    }
}

impl TryFrom<NoiseParametersInput> for NoiseParameters {
    type Error = ValidationError;

    fn try_from(raw: NoiseParametersInput) -> Result<Self, Self::Error> {
        Self::new(raw.t_sys_k, raw.bandwidth_hz)
    }
}

// ── Service Type ────────────────────────────────────────────────────

/// ITU-R service category; selects which standard gives the overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// Space research, deep space (SA.1157).
    #[serde(rename = "deep-space")]
    DeepSpace,
    /// Space research, near Earth (SA.609).
    #[serde(rename = "near-earth")]
    NearEarth,
}

impl ServiceType {
    /// Parse the wire literal. Unknown literals return `None` so callers
    /// can emit a sentinel verdict instead of failing.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "deep-space" => Some(Self::DeepSpace),
            "near-earth" => Some(Self::NearEarth),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeepSpace => "deep-space",
            Self::NearEarth => "near-earth",
        }
    }
}

// ── Compliance Verdict ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(rename = "COMPLIANT")]
    Compliant,
    #[serde(rename = "NON-COMPLIANT")]
    NonCompliant,
    #[serde(rename = "INVALID_SERVICE_TYPE")]
    InvalidServiceType,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "COMPLIANT",
            Self::NonCompliant => "NON-COMPLIANT",
            Self::InvalidServiceType => "INVALID_SERVICE_TYPE",
        }
    }
}

/// Outcome of comparing an exceedance rate against one standard.
///
/// The numeric fields are `None` only on the `INVALID_SERVICE_TYPE`
/// sentinel, where `standard` echoes the unrecognised service literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub standard: String,
    pub threshold_db: Option<f64>,
    pub max_time_fraction_pct: Option<f64>,
    pub observed_time_fraction_pct: Option<f64>,
    pub status: ComplianceStatus,
}

impl ComplianceVerdict {
    pub fn invalid_service(service_type: &str) -> Self {
        Self {
            standard: service_type.to_string(),
            threshold_db: None,
            max_time_fraction_pct: None,
            observed_time_fraction_pct: None,
            status: ComplianceStatus::InvalidServiceType,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.status == ComplianceStatus::Compliant
    }
}
