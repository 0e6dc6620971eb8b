//! Strategies that choose the next suggestion to review.

mod round_robin;
mod uncertainty;

pub use round_robin::RoundRobinStrategy;
pub use uncertainty::UncertaintySamplingStrategy;

use curator_core::config::ActiveLearningConfig;
use curator_core::errors::{ConfigError, CuratorResult};
use curator_core::models::{
    Delta, Layer, LearningRecord, Suggestion, SuggestionGroup, UserAction,
};

/// Name under which [`UncertaintySamplingStrategy`] is configured.
pub const UNCERTAINTY: &str = "uncertainty";
/// Name under which [`RoundRobinStrategy`] is configured.
pub const ROUND_ROBIN: &str = "round_robin";

/// Turns the visible suggestions of one layer into the next item to review.
pub trait IActiveLearningStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// The delta to present next, or `None` when nothing on `layer` is left
    /// to decide. `records` is the user's history on that layer.
    fn generate_next_suggestion(
        &self,
        records: &[LearningRecord],
        layer: &Layer,
        groups: &[SuggestionGroup],
    ) -> Option<Delta>;
}

/// Build the strategy named in the config.
pub fn build_strategy(config: &ActiveLearningConfig) -> CuratorResult<Box<dyn IActiveLearningStrategy>> {
    match config.strategy.as_str() {
        UNCERTAINTY => Ok(Box::new(UncertaintySamplingStrategy::new(config.min_confidence))),
        ROUND_ROBIN => Ok(Box::new(RoundRobinStrategy::new(config.min_confidence))),
        other => Err(ConfigError::InvalidValue {
            field: "active_learning.strategy".to_string(),
            reason: format!("unknown strategy {other:?}, expected {UNCERTAINTY:?} or {ROUND_ROBIN:?}"),
        }
        .into()),
    }
}

/// Per-recommender deltas of the visible groups on `layer` that are confident
/// enough and not yet decided, in group order.
pub(crate) fn candidates(
    records: &[LearningRecord],
    layer: &Layer,
    groups: &[SuggestionGroup],
    min_confidence: f64,
) -> Vec<Delta> {
    groups
        .iter()
        .filter(|g| g.layer_id() == layer.id)
        .flat_map(SuggestionGroup::top_deltas)
        .filter(|d| d.first.score >= min_confidence)
        .filter(|d| !is_decided(records, &d.first))
        .collect()
}

/// A record on the same label decides a suggestion. A correction settles
/// its whole position whatever label it carries.
pub(crate) fn is_decided(records: &[LearningRecord], suggestion: &Suggestion) -> bool {
    records.iter().any(|r| {
        if r.layer_id != suggestion.layer_id || r.feature != suggestion.feature {
            return false;
        }
        if r.action == UserAction::Corrected {
            return r.document_name == suggestion.document_name && r.offset == suggestion.offset;
        }
        suggestion
            .label
            .as_deref()
            .is_some_and(|label| r.matches(&suggestion.document_name, suggestion.offset, label))
    })
}
