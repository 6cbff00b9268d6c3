//! Shared application state.

use std::sync::Arc;

use rfi_common::presets::BandRegistry;
use rfi_engine::EngineSettings;

use crate::config::{Limits, ServiceConfig};

/// State shared across all request handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    registry: BandRegistry,
    engine: EngineSettings,
    limits: Limits,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: config.registry(),
                engine: config.engine,
                limits: config.limits,
            }),
        }
    }

    /// Band preset catalog.
    pub fn registry(&self) -> &BandRegistry {
        &self.inner.registry
    }

    pub fn engine(&self) -> &EngineSettings {
        &self.inner.engine
    }

    pub fn limits(&self) -> Limits {
        self.inner.limits
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ServiceConfig::default())
    }
}
