use serde::{Deserialize, Serialize};

use super::defaults;

/// Recommender self-evaluation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Fraction of samples routed to the test partition.
    pub test_percentage: f64,
    /// Labeled samples required in each partition before scoring.
    pub min_labeled_samples: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            test_percentage: defaults::DEFAULT_TEST_PERCENTAGE,
            min_labeled_samples: defaults::DEFAULT_MIN_LABELED_SAMPLES,
        }
    }
}
