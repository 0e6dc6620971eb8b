//! Highest-uncertainty-first selection.

use curator_core::models::{Delta, Layer, LearningRecord, SuggestionGroup};

use super::{candidates, IActiveLearningStrategy, UNCERTAINTY};

/// Offers the suggestion whose recommender was least sure of its choice:
/// the smallest gap between best and second-best score. Ties go to the
/// earliest group.
#[derive(Debug, Clone)]
pub struct UncertaintySamplingStrategy {
    min_confidence: f64,
}

impl UncertaintySamplingStrategy {
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }
}

impl IActiveLearningStrategy for UncertaintySamplingStrategy {
    fn name(&self) -> &str {
        UNCERTAINTY
    }

    fn generate_next_suggestion(
        &self,
        records: &[LearningRecord],
        layer: &Layer,
        groups: &[SuggestionGroup],
    ) -> Option<Delta> {
        candidates(records, layer, groups, self.min_confidence)
            .into_iter()
            .min_by(|a, b| a.delta.total_cmp(&b.delta))
    }
}
