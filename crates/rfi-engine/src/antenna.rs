//! Receive antenna off-axis discrimination.
//!
//! Simplified ITU-R S.1528 shape: parabolic main lobe out to 2.5 × θ3dB,
//! then a flat side-lobe floor 30 dB below boresight.

use rfi_common::error;
use rfi_common::ValidationError;

/// Main-lobe edge as a multiple of the 3 dB beamwidth.
pub const MAIN_LOBE_EDGE_FACTOR: f64 = 2.5;

/// Side-lobe floor relative to boresight gain.
pub const SIDE_LOBE_FLOOR_DB: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntennaPattern {
    g_max_db: f64,
    theta_3db: f64,
}

impl AntennaPattern {
    pub fn new(g_max_db: f64, theta_3db: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            g_max_db: error::finite("G_rx_db", g_max_db)?,
            theta_3db: error::positive("theta_3db", theta_3db)?,
        })
    }

    /// Gain towards an emitter `theta_deg` off boresight.
    ///
    /// The angle is compared against the main-lobe edge as given, so a
    /// negative angle always stays on the parabola.
    pub fn gain_db(&self, theta_deg: f64) -> f64 {
        if theta_deg < MAIN_LOBE_EDGE_FACTOR * self.theta_3db {
            self.g_max_db - 12.0 * (theta_deg / self.theta_3db).powi(2)
        } else {
            self.g_max_db - SIDE_LOBE_FLOOR_DB
        }
    }
}

/// One-shot form of [`AntennaPattern::gain_db`].
pub fn off_axis_gain_db(
    g_max_db: f64,
    theta_deg: f64,
    theta_3db: f64,
) -> Result<f64, ValidationError> {
    Ok(AntennaPattern::new(g_max_db, theta_3db)?.gain_db(theta_deg))
}
