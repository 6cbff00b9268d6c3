//! Multi-entry interference aggregation (ITU-R S.1325).
//!
//! Each interferer is reduced to a single-entry interference power and an
//! epfd value; both are then summed in watts via [`sum_db`].

use serde::Serialize;

use rfi_common::error;
use rfi_common::models::{BandParameters, Interferer, NoiseParameters};
use rfi_common::ValidationError;

use crate::antenna::AntennaPattern;
use crate::link_budget::{fspl_db, LinkBudget};
use crate::units::sum_db;

/// Contribution of one interferer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntryContribution {
    pub path_loss_db: f64,
    pub off_axis_gain_db: f64,
    pub interference_dbw: f64,
    pub epfd_dbw_m2_mhz: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub i_aggregate_dbw: f64,
    pub ci_aggregate_db: f64,
    pub snr_with_interference_db: f64,
    pub snr_loss_db: f64,
    pub epfd_aggregate_dbw_m2_mhz: f64,
    pub entries: Vec<EntryContribution>,
}

/// `I = EIRP − L_fs − L_atm + G_off − L_misc`.
pub fn interference_power_dbw(
    eirp_dbw: f64,
    path_loss_db: f64,
    atm_loss_db: f64,
    off_axis_gain_db: f64,
    misc_loss_db: f64,
) -> f64 {
    eirp_dbw - path_loss_db - atm_loss_db + off_axis_gain_db - misc_loss_db
}

/// Equivalent power flux density in dBW/m²/MHz.
///
/// `epfd = EIRP − L_fs + G_off − 10·log10(4π·d²) − 10·log10(B_MHz)`, d in m.
pub fn epfd_dbw_m2_mhz(
    eirp_dbw: f64,
    path_loss_db: f64,
    off_axis_gain_db: f64,
    d_km: f64,
    bandwidth_mhz: f64,
) -> f64 {
    let d_m = d_km * 1000.0;
    let spreading_db = 10.0 * (4.0 * std::f64::consts::PI * d_m * d_m).log10();
    eirp_dbw - path_loss_db + off_axis_gain_db - spreading_db - 10.0 * bandwidth_mhz.log10()
}

/// Sums interferer contributions against one wanted link.
#[derive(Debug, Clone, Copy)]
pub struct InterferenceAggregator<'a> {
    band: &'a BandParameters,
    noise: &'a NoiseParameters,
    pattern: AntennaPattern,
    atm_loss_db: f64,
}

impl<'a> InterferenceAggregator<'a> {
    pub fn new(
        band: &'a BandParameters,
        noise: &'a NoiseParameters,
        atm_loss_db: f64,
    ) -> Result<Self, ValidationError> {
        let pattern = AntennaPattern::new(band.g_rx_db(), band.theta_3db())?;
        Ok(Self {
            band,
            noise,
            pattern,
            atm_loss_db,
        })
    }

    pub fn entry(&self, interferer: &Interferer) -> EntryContribution {
        let path_loss_db = fspl_db(self.band.f_ghz(), interferer.d_km());
        let off_axis_gain_db = self.pattern.gain_db(interferer.theta_off_axis_deg());
        EntryContribution {
            path_loss_db,
            off_axis_gain_db,
            interference_dbw: interference_power_dbw(
                interferer.eirp_dbw(),
                path_loss_db,
                self.atm_loss_db,
                off_axis_gain_db,
                interferer.misc_loss_db(),
            ),
            epfd_dbw_m2_mhz: epfd_dbw_m2_mhz(
                interferer.eirp_dbw(),
                path_loss_db,
                off_axis_gain_db,
                interferer.d_km(),
                self.noise.bandwidth_mhz(),
            ),
        }
    }

    /// Aggregate every interferer against `link`.
    pub fn aggregate(
        &self,
        link: &LinkBudget,
        interferers: &[Interferer],
    ) -> Result<AggregateResult, ValidationError> {
        if interferers.is_empty() {
            return Err(ValidationError::EmptyInterferers);
        }

        let entries: Vec<EntryContribution> = interferers.iter().map(|i| self.entry(i)).collect();
        let i_aggregate_dbw = error::representable(
            "i_aggregate_dbw",
            sum_db(entries.iter().map(|e| e.interference_dbw)),
        )?;
        let epfd_aggregate_dbw_m2_mhz = error::representable(
            "epfd_aggregate_dbw_m2_mhz",
            sum_db(entries.iter().map(|e| e.epfd_dbw_m2_mhz)),
        )?;
        let snr_with_interference_db =
            error::representable("snr_with_interference_db", link.snr_with(i_aggregate_dbw))?;

        tracing::debug!(
            entries = entries.len(),
            i_aggregate_dbw,
            epfd_aggregate_dbw_m2_mhz,
            "aggregated interference"
        );

        Ok(AggregateResult {
            i_aggregate_dbw,
            ci_aggregate_db: link.carrier_dbw - i_aggregate_dbw,
            snr_with_interference_db,
            snr_loss_db: link.baseline_snr_db - snr_with_interference_db,
            epfd_aggregate_dbw_m2_mhz,
            entries,
        })
    }
}
