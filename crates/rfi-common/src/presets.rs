//! Band presets: named wanted-link parameters.
//!
//! All built-in presets sit at GEO range. Each carries its own system
//! temperature and bandwidth, used only for that preset's noise floor.
//! The registry is built explicitly and handed to request handlers; there
//! is no global table.

use serde::{Deserialize, Serialize};

use crate::models::{BandParameters, NoiseParameters};

/// GEO slant range used by every built-in preset.
pub const D_KM_GEO: f64 = 35786.0;

/// One named band configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPreset {
    pub name: String,
    /// Descriptive service label, e.g. "SRS deep-space (SA.1157)".
    pub service: String,
    pub band: BandParameters,
    pub noise: NoiseParameters,
}

struct BuiltinRow {
    name: &'static str,
    service: &'static str,
    band: BandParameters,
    noise: NoiseParameters,
}

// band: f_ghz, d_km, EIRP_dbw, G_rx_db, theta_3db; noise: T_sys_k, B_Hz
const BUILTIN: &[BuiltinRow] = &[
    BuiltinRow {
        name: "S-band",
        service: "SRS near-Earth (SA.609)",
        band: BandParameters::trusted(2.25, D_KM_GEO, 26.0, 30.0, 2.0),
        noise: NoiseParameters::trusted(320.0, 1e6),
    },
    BuiltinRow {
        name: "X-band",
        service: "SRS deep-space (SA.1157)",
        band: BandParameters::trusted(8.0, D_KM_GEO, 30.0, 35.0, 1.5),
        noise: NoiseParameters::trusted(250.0, 1e6),
    },
    BuiltinRow {
        name: "Ku-band",
        service: "FSS GEO gateway (S.1325)",
        band: BandParameters::trusted(14.25, D_KM_GEO, 45.0, 40.0, 1.0),
        noise: NoiseParameters::trusted(600.0, 5e6),
    },
    BuiltinRow {
        name: "K-band",
        service: "FSS high-frequency",
        band: BandParameters::trusted(20.0, D_KM_GEO, 50.0, 45.0, 0.8),
        noise: NoiseParameters::trusted(700.0, 10e6),
    },
    BuiltinRow {
        name: "Ka-band",
        service: "FSS / feeder link",
        band: BandParameters::trusted(30.0, D_KM_GEO, 55.0, 50.0, 0.6),
        noise: NoiseParameters::trusted(800.0, 20e6),
    },
];

/// Immutable name → preset catalog.
#[derive(Debug, Clone, Default)]
pub struct BandRegistry {
    presets: Vec<BandPreset>,
}

impl BandRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The five standard bands, S through Ka.
    pub fn builtin() -> Self {
        let presets = BUILTIN
            .iter()
            .map(|r| BandPreset {
                name: r.name.to_string(),
                service: r.service.to_string(),
                band: r.band,
                noise: r.noise,
            })
            .collect();
        Self { presets }
    }

    /// Add a preset, replacing any existing one with the same name.
    pub fn with_preset(mut self, preset: BandPreset) -> Self {
        match self
            .presets
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&preset.name))
        {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
        self
    }

    /// Look up a preset by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&BandPreset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BandPreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_all_bands() {
        let reg = BandRegistry::builtin();
        assert_eq!(reg.len(), BUILTIN.len());
        for name in ["S-band", "X-band", "Ku-band", "K-band", "Ka-band"] {
            assert!(reg.get(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn builtin_rows_pass_validation() {
        let reg = BandRegistry::builtin();
        for r in BUILTIN {
            let b = &r.band;
            let band =
                BandParameters::new(b.f_ghz(), b.d_km(), b.eirp_dbw(), b.g_rx_db(), b.theta_3db())
                    .unwrap();
            let noise = NoiseParameters::new(r.noise.t_sys_k(), r.noise.bandwidth_hz()).unwrap();
            let preset = reg.get(r.name).unwrap();
            assert_eq!(preset.band, band, "{}", r.name);
            assert_eq!(preset.noise, noise, "{}", r.name);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let reg = BandRegistry::builtin();
        let x = reg.get("x-BAND").unwrap();
        assert_eq!(x.band.f_ghz(), 8.0);
        assert_eq!(x.noise.t_sys_k(), 250.0);
        assert_eq!(x.service, "SRS deep-space (SA.1157)");
    }

    #[test]
    fn unknown_band_is_none() {
        assert!(BandRegistry::builtin().get("L-band").is_none());
    }

    #[test]
    fn with_preset_overrides_existing() {
        let custom = BandPreset {
            name: "s-band".into(),
            service: "custom".into(),
            band: BandParameters::new(2.2, 1000.0, 20.0, 25.0, 3.0).unwrap(),
            noise: NoiseParameters::default(),
        };
        let reg = BandRegistry::builtin().with_preset(custom);
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.get("S-band").unwrap().service, "custom");
    }
}
