//! Layered configuration loaded from TOML. Every section falls back to
//! the values in [`defaults`].

mod active_learning_config;
pub mod defaults;
mod evaluation_config;
mod observability_config;
mod prediction_config;
mod string_match_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use active_learning_config::ActiveLearningConfig;
pub use evaluation_config::EvaluationConfig;
pub use observability_config::ObservabilityConfig;
pub use prediction_config::PredictionConfig;
pub use string_match_config::StringMatchConfig;

use crate::errors::{ConfigError, CuratorResult};

/// Root configuration for the whole system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    pub prediction: PredictionConfig,
    pub string_match: StringMatchConfig,
    pub evaluation: EvaluationConfig,
    pub active_learning: ActiveLearningConfig,
    pub observability: ObservabilityConfig,
}

impl CuratorConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml(source: &str) -> CuratorResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CuratorResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&source)
    }

    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> CuratorResult<()> {
        let pct = self.evaluation.test_percentage;
        if !(pct > 0.0 && pct < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "evaluation.test_percentage".to_string(),
                reason: format!("{pct} is not strictly between 0 and 1"),
            }
            .into());
        }
        let min_conf = self.active_learning.min_confidence;
        if !(0.0..=1.0).contains(&min_conf) {
            return Err(ConfigError::InvalidValue {
                field: "active_learning.min_confidence".to_string(),
                reason: format!("{min_conf} is outside [0, 1]"),
            }
            .into());
        }
        if self.string_match.default_max_recommendations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "string_match.default_max_recommendations".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
