use serde::{Deserialize, Serialize};

use super::LayerId;
use super::ProjectId;

pub type RecommenderId = u64;

/// Recommender configuration bound to exactly one (layer, feature) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommender {
    pub id: RecommenderId,
    pub name: String,
    pub project_id: ProjectId,
    pub layer_id: LayerId,
    /// Name of the layer, as engines address annotation types by name.
    pub layer_name: String,
    pub feature: String,
    /// Engine kind, resolved through the factory registry.
    pub tool: String,
    /// Upper bound on labels suggested per position.
    pub max_recommendations: usize,
    /// Minimum evaluation score for activation.
    #[serde(default)]
    pub threshold: f64,
    /// Activate without evaluation.
    #[serde(default)]
    pub always_selected: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Engine-specific settings.
    #[serde(default)]
    pub traits: serde_json::Value,
}

fn default_true() -> bool {
    true
}
