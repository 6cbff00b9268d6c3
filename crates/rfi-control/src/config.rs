//! Service configuration loaded from TOML.
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:3000"
//!
//! [limits]
//! max_samples = 1000000
//! max_grid_points = 1000000
//!
//! [engine]
//! t_sys_k = 250.0
//! bandwidth_hz = 1e6
//! atm_loss_db = 0.0
//! ccdf_points = 200
//!
//! [[bands]]
//! name = "C-band"
//! service = "FSS downlink"
//! f_ghz = 4.0
//! EIRP_dbw = 40.0
//! G_rx_db = 38.0
//! theta_3db = 1.2
//! ```
//!
//! Every key is optional; empty input yields [`ServiceConfig::default`].

use std::net::SocketAddr;

use serde::Deserialize;
use thiserror::Error;

use rfi_common::models::{BandParameters, NoiseParameters, DEFAULT_BANDWIDTH_HZ, DEFAULT_T_SYS_K};
use rfi_common::presets::{BandPreset, BandRegistry, D_KM_GEO};
use rfi_common::ValidationError;
use rfi_engine::EngineSettings;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_SAMPLES: usize = 1_000_000;
pub const DEFAULT_MAX_GRID_POINTS: usize = 1_000_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid listen address {addr:?}: {source}")]
    ListenAddr {
        addr: String,
        source: std::net::AddrParseError,
    },
    #[error("[engine] {0}")]
    Engine(ValidationError),
    #[error("[limits] {field} must be greater than zero")]
    Limit { field: &'static str },
    #[error("band {name:?}: {source}")]
    Band {
        name: String,
        source: ValidationError,
    },
    #[error("band entry {index} has no name")]
    UnnamedBand { index: usize },
}

// ── Raw input ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfigInput {
    pub server: ServerConfigInput,
    pub limits: LimitsConfigInput,
    pub engine: EngineConfigInput,
    pub bands: Vec<BandConfigInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfigInput {
    pub listen_addr: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LimitsConfigInput {
    pub max_samples: Option<usize>,
    pub max_grid_points: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfigInput {
    pub t_sys_k: Option<f64>,
    pub bandwidth_hz: Option<f64>,
    pub atm_loss_db: Option<f64>,
    pub ccdf_points: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BandConfigInput {
    pub name: String,
    pub service: String,
    pub f_ghz: f64,
    pub d_km: Option<f64>,
    #[serde(rename = "EIRP_dbw")]
    pub eirp_dbw: f64,
    #[serde(rename = "G_rx_db")]
    pub g_rx_db: f64,
    pub theta_3db: f64,
    #[serde(rename = "T_sys_k")]
    pub t_sys_k: Option<f64>,
    #[serde(rename = "B_Hz")]
    pub bandwidth_hz: Option<f64>,
}

// ── Resolved ────────────────────────────────────────────────────────

/// Request-size guards applied before any engine work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_samples: usize,
    pub max_grid_points: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_samples: DEFAULT_MAX_SAMPLES,
            max_grid_points: DEFAULT_MAX_GRID_POINTS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_addr: SocketAddr,
    pub limits: Limits,
    pub engine: EngineSettings,
    /// Extra presets layered over the built-in catalog.
    pub bands: Vec<BandPreset>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            limits: Limits::default(),
            engine: EngineSettings::default(),
            bands: Vec::new(),
        }
    }
}

impl BandConfigInput {
    fn resolve(self, index: usize) -> Result<BandPreset, ConfigError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::UnnamedBand { index });
        }
        let band = BandParameters::new(
            self.f_ghz,
            self.d_km.unwrap_or(D_KM_GEO),
            self.eirp_dbw,
            self.g_rx_db,
            self.theta_3db,
        );
        let noise = NoiseParameters::new(
            self.t_sys_k.unwrap_or(DEFAULT_T_SYS_K),
            self.bandwidth_hz.unwrap_or(DEFAULT_BANDWIDTH_HZ),
        );
        match (band, noise) {
            (Ok(band), Ok(noise)) => Ok(BandPreset {
                name,
                service: self.service,
                band,
                noise,
            }),
            (Err(source), _) | (_, Err(source)) => Err(ConfigError::Band { name, source }),
        }
    }
}

impl ServiceConfigInput {
    pub fn resolve(self) -> Result<ServiceConfig, ConfigError> {
        let defaults = ServiceConfig::default();

        let listen_addr = match self.server.listen_addr {
            Some(addr) => addr
                .trim()
                .parse()
                .map_err(|source| ConfigError::ListenAddr { addr, source })?,
            None => defaults.listen_addr,
        };

        let limits = Limits {
            max_samples: self.limits.max_samples.unwrap_or(defaults.limits.max_samples),
            max_grid_points: self
                .limits
                .max_grid_points
                .unwrap_or(defaults.limits.max_grid_points),
        };
        if limits.max_samples == 0 {
            return Err(ConfigError::Limit {
                field: "max_samples",
            });
        }
        if limits.max_grid_points == 0 {
            return Err(ConfigError::Limit {
                field: "max_grid_points",
            });
        }

        let base = defaults.engine;
        let noise = NoiseParameters::new(
            self.engine.t_sys_k.unwrap_or(base.noise.t_sys_k()),
            self.engine.bandwidth_hz.unwrap_or(base.noise.bandwidth_hz()),
        )
        .map_err(ConfigError::Engine)?;
        let atm_loss_db = rfi_common::error::finite(
            "atm_loss_db",
            self.engine.atm_loss_db.unwrap_or(base.atm_loss_db),
        )
        .map_err(ConfigError::Engine)?;
        let ccdf_points = rfi_common::error::nonzero_count(
            "ccdf_points",
            self.engine.ccdf_points.unwrap_or(base.ccdf_points),
        )
        .map_err(ConfigError::Engine)?;
        let engine = EngineSettings {
            noise,
            atm_loss_db,
            ccdf_points,
            ..base
        };

        let bands = self
            .bands
            .into_iter()
            .enumerate()
            .map(|(idx, b)| b.resolve(idx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ServiceConfig {
            listen_addr,
            limits,
            engine,
            bands,
        })
    }
}

impl ServiceConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(ServiceConfig::default());
        }
        let parsed: ServiceConfigInput = toml::from_str(input)?;
        parsed.resolve()
    }

    /// Built-in catalog with configured bands added or overriding by name.
    pub fn registry(&self) -> BandRegistry {
        self.bands
            .iter()
            .cloned()
            .fold(BandRegistry::builtin(), BandRegistry::with_preset)
    }
}
