//! Wanted-link budget: thermal noise, free-space loss, carrier and SNR.

use serde::Serialize;

use rfi_common::error;
use rfi_common::models::{BandParameters, NoiseParameters};
use rfi_common::ValidationError;

use crate::units::{db_to_linear, linear_to_db};

/// Boltzmann constant, J/K.
pub const BOLTZMANN: f64 = 1.380649e-23;

/// `N = 10·log10(k·T·B)` in dBW.
pub fn thermal_noise_dbw(noise: &NoiseParameters) -> f64 {
    linear_to_db(BOLTZMANN * noise.t_sys_k() * noise.bandwidth_hz())
}

/// Free-space path loss (ITU-R P.525), frequency in GHz and range in km.
pub fn free_space_path_loss_db(f_ghz: f64, d_km: f64) -> Result<f64, ValidationError> {
    let f_ghz = error::positive("f_ghz", f_ghz)?;
    let d_km = error::positive("d_km", d_km)?;
    Ok(fspl_db(f_ghz, d_km))
}

/// Unchecked path loss; callers hold validated positive inputs.
#[inline]
pub(crate) fn fspl_db(f_ghz: f64, d_km: f64) -> f64 {
    let f_mhz = f_ghz * 1000.0;
    32.45 + 20.0 * f_mhz.log10() + 20.0 * d_km.log10()
}

/// `SNR = C / (N + I)` evaluated in watts, returned in dB.
pub fn snr_with_interference_db(c_dbw: f64, n_dbw: f64, i_dbw: f64) -> f64 {
    let c = db_to_linear(c_dbw);
    let n = db_to_linear(n_dbw);
    let i = db_to_linear(i_dbw);
    linear_to_db(c / (n + i))
}

/// Baseline quantities for one wanted link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkBudget {
    pub path_loss_db: f64,
    pub carrier_dbw: f64,
    pub noise_dbw: f64,
    pub baseline_snr_db: f64,
}

impl LinkBudget {
    /// `C = EIRP − L_fs − L_atm + G_rx`, `SNR = C − N`.
    pub fn compute(band: &BandParameters, noise: &NoiseParameters, atm_loss_db: f64) -> Self {
        let path_loss_db = fspl_db(band.f_ghz(), band.d_km());
        let carrier_dbw = band.eirp_dbw() - path_loss_db - atm_loss_db + band.g_rx_db();
        let noise_dbw = thermal_noise_dbw(noise);
        Self {
            path_loss_db,
            carrier_dbw,
            noise_dbw,
            baseline_snr_db: carrier_dbw - noise_dbw,
        }
    }

    pub fn snr_with(&self, i_dbw: f64) -> f64 {
        snr_with_interference_db(self.carrier_dbw, self.noise_dbw, i_dbw)
    }

    /// Degradation of the baseline SNR caused by interference `i_dbw`.
    pub fn snr_loss(&self, i_dbw: f64) -> f64 {
        self.baseline_snr_db - self.snr_with(i_dbw)
    }
}
