pub mod layer_config;
pub mod observability_config;
pub mod timeline_config;

use serde::{Deserialize, Serialize};

pub use layer_config::LayerConfig;
pub use observability_config::ObservabilityConfig;
pub use timeline_config::TimelineConfig;

use crate::errors::{HolMapError, HolMapResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct HolMapConfig {
    pub layer: LayerConfig,
    pub timeline: TimelineConfig,
    pub observability: ObservabilityConfig,
}

impl HolMapConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> HolMapResult<Self> {
        toml::from_str(toml_str).map_err(|e| HolMapError::Config(e.to_string()))
    }

    /// Load config from a JSON options object, as embedding pages pass it.
    pub fn from_json(json: &str) -> HolMapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
