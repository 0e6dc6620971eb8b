use serde::{Deserialize, Serialize};

use super::defaults;

/// String-matching engine defaults. Recommender traits may override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StringMatchConfig {
    /// Collapse whitespace runs when building and probing the dictionary.
    pub normalize_whitespace: bool,
    /// Labels emitted per matched span when a recommender does not set a bound.
    pub default_max_recommendations: usize,
}

impl Default for StringMatchConfig {
    fn default() -> Self {
        Self {
            normalize_whitespace: defaults::DEFAULT_NORMALIZE_WHITESPACE,
            default_max_recommendations: defaults::DEFAULT_MAX_RECOMMENDATIONS,
        }
    }
}
