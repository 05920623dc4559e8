//! Engine configuration loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```toml
//! history_years = 5
//!
//! [predictor]
//! recent_years = 5
//!
//! [predictor.winsor]
//! lower = 0.05
//! upper = 0.95
//!
//! [predictor.seasonal]
//! min_len = 24
//! ```

use crate::error::{PrecipError, Result};
use crate::models::PredictorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for the prediction engine and its views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub predictor: PredictorConfig,
    /// Distinct years shown by the recent history view.
    pub history_years: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            predictor: PredictorConfig::default(),
            history_years: 5,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PrecipError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_years == 0 {
            return Err(PrecipError::Config(
                "history_years must be at least 1".to_string(),
            ));
        }
        self.predictor.validate()
    }
}
