use serde::{Deserialize, Serialize};

use super::defaults;

/// Active learning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveLearningConfig {
    /// Strategy name: "uncertainty" or "round_robin".
    pub strategy: String,
    /// Suggestions whose best score is below this are never offered.
    pub min_confidence: f64,
}

impl Default for ActiveLearningConfig {
    fn default() -> Self {
        Self {
            strategy: defaults::DEFAULT_STRATEGY.to_string(),
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
        }
    }
}
