//! Configuration system
//!
//! Engine tuning values live in [`EngineConfig`], loadable from TOML or RON
//! files through the [`Config`] trait.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Tuning values for the intersection engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum sorted candidates narrow-phase tested per source per tick.
    ///
    /// When the broad phase survives with more candidates than this, the
    /// narrow phase is skipped for that source this frame. A cost bound
    /// under pathological scene density, not an error condition.
    pub max_tests_per_source: usize,

    /// Edge length of one spatial-hash grid cell, in world units
    pub cell_size: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tests_per_source: 250,
            cell_size: 1.0,
        }
    }
}

impl Config for EngineConfig {}
