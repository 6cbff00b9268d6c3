//! Deterministic single-interferer pass.
//!
//! The interferer's off-axis angle and range evolve linearly in time; at
//! each grid point the closed-form single-entry budget gives the
//! instantaneous SNR loss. No sampling is involved, so identical inputs
//! always produce bit-identical output.

use serde::Serialize;

use rfi_common::error;
use rfi_common::models::{BandParameters, DynamicInterferer, NoiseParameters};
use rfi_common::ValidationError;

use crate::aggregate::interference_power_dbw;
use crate::antenna::AntennaPattern;
use crate::link_budget::{fspl_db, LinkBudget};
use crate::samples::SampleSet;

/// `t = 0, Δt, 2Δt, … < duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    duration_s: f64,
    step_s: f64,
}

impl TimeGrid {
    pub fn new(duration_s: f64, step_s: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            duration_s: error::positive("duration_s", duration_s)?,
            step_s: error::positive("time_step_s", step_s)?,
        })
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn step_s(&self) -> f64 {
        self.step_s
    }

    /// Number of grid points in `[0, duration)`.
    pub fn len(&self) -> usize {
        (self.duration_s / self.step_s).ceil() as usize
    }

    /// Always false for a validated grid.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |k| k as f64 * self.step_s)
    }
}

/// SNR loss sampled along the pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicTimeSeries {
    pub time_s: Vec<f64>,
    pub snr_loss_db: Vec<f64>,
}

impl DynamicTimeSeries {
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time_s.iter().copied().zip(self.snr_loss_db.iter().copied())
    }

    /// Worst instantaneous loss over the pass.
    pub fn peak_snr_loss_db(&self) -> f64 {
        self.snr_loss_db.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// The loss series viewed as a sample set, for compliance evaluation.
    pub fn to_sample_set(&self) -> Result<SampleSet, ValidationError> {
        SampleSet::new(self.snr_loss_db.clone())
    }
}

#[derive(Debug)]
pub struct DynamicPassSimulator<'a> {
    band: &'a BandParameters,
    link: LinkBudget,
    pattern: AntennaPattern,
    atm_loss_db: f64,
}

impl<'a> DynamicPassSimulator<'a> {
    pub fn new(
        band: &'a BandParameters,
        noise: &NoiseParameters,
        atm_loss_db: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            band,
            link: LinkBudget::compute(band, noise, atm_loss_db),
            pattern: AntennaPattern::new(band.g_rx_db(), band.theta_3db())?,
            atm_loss_db,
        })
    }

    /// Baseline computed once for the whole pass.
    pub fn link(&self) -> &LinkBudget {
        &self.link
    }

    /// Instantaneous SNR loss for an emitter at `theta_deg`, `d_km`.
    ///
    /// Interference uses the link's nominal atmospheric loss, matching the
    /// static single-entry budget.
    pub fn snr_loss_at(&self, eirp_dbw: f64, theta_deg: f64, d_km: f64) -> f64 {
        let path_loss_db = fspl_db(self.band.f_ghz(), d_km);
        let gain_db = self.pattern.gain_db(theta_deg);
        let i_dbw = interference_power_dbw(eirp_dbw, path_loss_db, self.atm_loss_db, gain_db, 0.0);
        self.link.snr_loss(i_dbw)
    }

    /// Sweep `interferer` across `grid`.
    ///
    /// Fails up front if the range reaches zero anywhere on the grid, and
    /// with [`ValidationError::Overflow`] if any loss is not finite.
    pub fn simulate(
        &self,
        interferer: &DynamicInterferer,
        grid: &TimeGrid,
    ) -> Result<DynamicTimeSeries, ValidationError> {
        if let Some(t) = grid.times().find(|&t| interferer.distance_at(t) <= 0.0) {
            return Err(ValidationError::NonPositiveRange {
                time_s: t,
                distance_km: interferer.distance_at(t),
            });
        }

        let time_s: Vec<f64> = grid.times().collect();
        let snr_loss_db = time_s
            .iter()
            .map(|&t| {
                error::representable(
                    "snr_loss_db",
                    self.snr_loss_at(
                        interferer.eirp_dbw(),
                        interferer.angle_at(t),
                        interferer.distance_at(t),
                    ),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DynamicTimeSeries {
            time_s,
            snr_loss_db,
        })
    }

    /// SNR loss at fixed range for each angle in `angles_deg`.
    pub fn sweep_angles(
        &self,
        eirp_dbw: f64,
        d_km: f64,
        angles_deg: &[f64],
    ) -> Result<Vec<f64>, ValidationError> {
        let d_km = error::positive("d_km", d_km)?;
        angles_deg
            .iter()
            .map(|&theta| {
                error::representable("snr_loss_db", self.snr_loss_at(eirp_dbw, theta, d_km))
            })
            .collect()
    }
}

/// Off-axis angle profile of a symmetric pass: starts at `max_theta_deg`,
/// reaches `min_theta_deg` at the midpoint (closest approach) and returns.
pub fn cosine_pass_angles(
    max_theta_deg: f64,
    min_theta_deg: f64,
    num_steps: usize,
) -> Result<Vec<f64>, ValidationError> {
    error::nonzero_count("num_steps", num_steps)?;
    let span = max_theta_deg - min_theta_deg;
    if num_steps == 1 {
        return Ok(vec![max_theta_deg]);
    }
    Ok((0..num_steps)
        .map(|k| {
            let t = -1.0 + 2.0 * k as f64 / (num_steps - 1) as f64;
            let closeness = 0.5 * (1.0 + (t * std::f64::consts::PI).cos());
            max_theta_deg - closeness * span
        })
        .collect())
}
