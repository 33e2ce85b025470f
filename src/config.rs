//=========================================================================
// Bridge Configuration
//=========================================================================
//
// Tunables for the bridge, loadable from TOML.
//
// ```toml
// axis_deadzone = 0.05
// command_budget = 100
// event_capacity = 256
// ```
//
// Missing keys take their defaults; unknown keys are rejected.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::DEFAULT_AXIS_DEADZONE;

//=== Defaults ============================================================

pub const DEFAULT_COMMAND_BUDGET: usize = 100;
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

//=== BridgeConfig ========================================================

/// Bridge tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Axis magnitudes below this are reported as exactly 0.0.
    pub axis_deadzone: f32,

    /// Maximum commands executed per `pump_commands` call.
    pub command_budget: usize,

    /// Capacity of the bounded channel feeding the native consumer.
    pub event_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            axis_deadzone: DEFAULT_AXIS_DEADZONE,
            command_budget: DEFAULT_COMMAND_BUDGET,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl BridgeConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(target: "bridge", "Loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.axis_deadzone.is_finite() || !(0.0..1.0).contains(&self.axis_deadzone) {
            return Err(ConfigError::Invalid(format!(
                "axis_deadzone must be in [0, 1), got {}",
                self.axis_deadzone
            )));
        }
        if self.command_budget == 0 {
            return Err(ConfigError::Invalid("command_budget must be positive".into()));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Invalid("event_capacity must be positive".into()));
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
