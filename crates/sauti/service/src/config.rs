//! Service configuration.
//!
//! Assembled once at startup from CLI/environment by the binary; nothing
//! reads the environment lazily after that.

use sauti_engine::AlertConfig;
use sauti_pipeline::PipelineConfig;
use sauti_types::EntityType;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Per-entity-type ingestion switches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub driver: bool,
    pub trip: bool,
    pub app: bool,
    pub marshal: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            driver: true,
            trip: true,
            app: true,
            marshal: true,
        }
    }
}

impl FeatureFlags {
    pub fn enabled(&self, entity_type: EntityType) -> bool {
        match entity_type {
            EntityType::Driver => self.driver,
            EntityType::Trip => self.trip,
            EntityType::App => self.app,
            EntityType::Marshal => self.marshal,
        }
    }

    pub fn enabled_types(&self) -> Vec<EntityType> {
        EntityType::ALL
            .into_iter()
            .filter(|t| self.enabled(*t))
            .collect()
    }
}

/// Full daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub listen_addr: SocketAddr,
    /// Shared secret for the admin query surface.
    pub api_key: String,
    pub features: FeatureFlags,
    pub alert: AlertConfig,
    pub pipeline: PipelineConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: ([127, 0, 0, 1], 3000).into(),
            api_key: String::new(),
            features: FeatureFlags::default(),
            alert: AlertConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}
