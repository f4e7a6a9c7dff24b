//! Configuration loading for the strategy engine.
//!
//! Engine settings are loaded from a TOML configuration file. Every section
//! is optional and falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use strategy_types::Turn;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Turn range and seed
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Personality seeding
    #[serde(default)]
    pub personality: PersonalityConfig,
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.personality.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the selector and personality jitter
    pub seed: u64,
    /// Number of turns to run
    pub turns: i32,
    /// Turn number of the first simulated turn
    pub first_turn: Turn,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            turns: 100,
            first_turn: 0,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Bounds for jittering leader personalities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityConfig {
    /// Largest offset applied to a personality axis
    pub plus_minus: i32,
    /// Lowest value after jitter
    pub minimum: i32,
    /// Highest value after jitter
    pub maximum: i32,
}

/// Largest accepted `plus_minus`.
pub const MAX_PLUS_MINUS: i32 = 1000;

impl PersonalityConfig {
    /// Rejects inverted bounds and out-of-range jitter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum > self.maximum || !(0..=MAX_PLUS_MINUS).contains(&self.plus_minus) {
            return Err(ConfigError::InvalidPersonality {
                plus_minus: self.plus_minus,
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        Ok(())
    }
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            plus_minus: 2,
            minimum: 0,
            maximum: 20,
        }
    }
}

/// Error that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid personality bounds: plus_minus {plus_minus}, minimum {minimum}, maximum {maximum}")]
    InvalidPersonality {
        plus_minus: i32,
        minimum: i32,
        maximum: i32,
    },
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Strategy Engine Configuration

[simulation]
# Seed for production choices and personality jitter
seed = 42
turns = 100
first_turn = 0

[logging]
# Overridden by RUST_LOG when set
filter = "info"

[personality]
# Each leader flavor moves by up to this much, then is clamped
plus_minus = 2
minimum = 0
maximum = 20
"#
    .to_string()
}
