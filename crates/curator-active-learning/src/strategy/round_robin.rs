//! Take turns between recommenders.

use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};
use std::sync::{Mutex, PoisonError};

use curator_core::models::{Delta, Layer, LearningRecord, RecommenderId, SuggestionGroup};

use super::{candidates, IActiveLearningStrategy, ROUND_ROBIN};

/// Cycles through the recommenders that still have candidates, in id order,
/// and offers the most uncertain suggestion of the one whose turn it is.
#[derive(Debug)]
pub struct RoundRobinStrategy {
    min_confidence: f64,
    last: Mutex<Option<RecommenderId>>,
}

impl RoundRobinStrategy {
    pub fn new(min_confidence: f64) -> Self {
        Self {
            min_confidence,
            last: Mutex::new(None),
        }
    }
}

impl IActiveLearningStrategy for RoundRobinStrategy {
    fn name(&self) -> &str {
        ROUND_ROBIN
    }

    fn generate_next_suggestion(
        &self,
        records: &[LearningRecord],
        layer: &Layer,
        groups: &[SuggestionGroup],
    ) -> Option<Delta> {
        let deltas = candidates(records, layer, groups, self.min_confidence);
        let ids: BTreeSet<RecommenderId> = deltas.iter().map(|d| d.first.recommender_id).collect();

        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let turn = match *last {
            Some(prev) => ids
                .range((Excluded(prev), Unbounded))
                .next()
                .or_else(|| ids.first()),
            None => ids.first(),
        }
        .copied()?;

        let next = deltas
            .into_iter()
            .filter(|d| d.first.recommender_id == turn)
            .min_by(|a, b| a.delta.total_cmp(&b.delta))?;
        *last = Some(turn);
        Some(next)
    }
}
