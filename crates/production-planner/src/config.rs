//! Configuration loading for the production planner.
//!
//! Weighting constants and unit caps are loaded from a TOML configuration
//! file. Missing sections fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Complete planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Candidate weighting constants
    #[serde(default)]
    pub weights: WeightsConfig,
    /// Limits on civilian units
    #[serde(default)]
    pub caps: CapsConfig,
}

impl PlannerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PlannerConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, PlannerConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, PlannerConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Weights added for units an operation asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    /// Flat bonus for a unit requested by an operation
    pub army_unit_base: f64,
    /// Multiplier on the offense flavor for an operation unit
    pub operation_unit_flavor_multiplier: f64,
    /// Difficulty levels at or below this get no extra bonus
    pub difficulty_bonus_offset: i32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            army_unit_base: 750.0,
            operation_unit_flavor_multiplier: 250.0,
            difficulty_bonus_offset: 5,
        }
    }
}

/// Civilian unit caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsConfig {
    /// No more settlers are built once this many are on the map
    pub max_settlers_on_map: u32,
    /// Builders allowed per city before builders are no longer built
    pub max_builders_per_city: u32,
}

impl Default for CapsConfig {
    fn default() -> Self {
        Self {
            max_settlers_on_map: 2,
            max_builders_per_city: 1,
        }
    }
}

/// Error that can occur when loading or saving planner configuration.
#[derive(Debug, Error)]
pub enum PlannerConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Production Planner Configuration

[weights]
army_unit_base = 750.0
operation_unit_flavor_multiplier = 250.0
difficulty_bonus_offset = 5

[caps]
max_settlers_on_map = 2
max_builders_per_city = 1
"#
    .to_string()
}
