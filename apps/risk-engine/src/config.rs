//! Engine configuration.
//!
//! Scoring weights and the metrics lookback are caller-supplied policy,
//! not hardcoded fact. Configuration deserializes from YAML with
//! per-field defaults, so an empty document yields a fully-defaulted,
//! valid configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use risk_engine::config::EngineConfig;
//!
//! let config = EngineConfig::from_yaml_file("risk-engine.yaml")?;
//! let engine = risk_engine::RiskEngine::new(config)?;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::metrics::default_lookback_trades;
use crate::risk::ScoringConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("config validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Root engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Risk scorer weighting.
    pub scoring: ScoringConfig,
    /// Number of most-recent trades the metrics aggregator looks back
    /// over.
    pub lookback_trades: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            lookback_trades: default_lookback_trades(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_bw::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Validate ranges and cross-field invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scoring.validate()?;
        if self.lookback_trades == 0 {
            return Err(ValidationError::new(
                "config.lookbackTrades",
                "must be >= 1",
            ));
        }
        Ok(())
    }
}
