use serde::{Deserialize, Serialize};

use super::defaults;

/// Prediction orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Worker threads for multi-user prediction. 0 uses one per core.
    pub max_parallel_runs: usize,
    /// Trigger name recorded when a caller does not supply one.
    pub default_trigger: String,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            max_parallel_runs: defaults::DEFAULT_MAX_PARALLEL_RUNS,
            default_trigger: defaults::DEFAULT_TRIGGER.to_string(),
        }
    }
}
