use curator_core::config::{EvaluationConfig, StringMatchConfig};
use curator_core::constants::STRING_MATCHING_TOOL;
use curator_core::errors::CuratorResult;
use curator_core::models::{Feature, Layer, Recommender, RecommenderId};
use curator_core::traits::{IRecommendationEngine, IRecommenderFactory};
use dashmap::DashMap;

use crate::gazetteer::GazetteerEntry;
use crate::recommender::{StringMatchingRecommender, StringMatchingTraits};

/// Builds [`StringMatchingRecommender`]s, seeding each with the gazetteer
/// registered for its recommender id.
#[derive(Debug, Default)]
pub struct StringMatchingRecommenderFactory {
    config: StringMatchConfig,
    evaluation: EvaluationConfig,
    gazetteers: DashMap<RecommenderId, Vec<GazetteerEntry>>,
}

impl StringMatchingRecommenderFactory {
    pub fn new(config: StringMatchConfig, evaluation: EvaluationConfig) -> Self {
        Self {
            config,
            evaluation,
            gazetteers: DashMap::new(),
        }
    }

    /// Replace the gazetteer of a recommender.
    pub fn set_gazetteer(&self, recommender: RecommenderId, entries: Vec<GazetteerEntry>) {
        self.gazetteers.insert(recommender, entries);
    }
}

impl IRecommenderFactory for StringMatchingRecommenderFactory {
    fn id(&self) -> &str {
        STRING_MATCHING_TOOL
    }

    fn name(&self) -> &str {
        "String matcher"
    }

    fn accepts(&self, _layer: &Layer, feature: &Feature) -> bool {
        feature.value_type == "string"
    }

    fn build(&self, recommender: &Recommender) -> CuratorResult<Box<dyn IRecommendationEngine>> {
        let traits = StringMatchingTraits::from_json(&recommender.traits)?;
        let mut engine = StringMatchingRecommender::new(recommender, &traits, &self.config)
            .with_min_labeled_samples(self.evaluation.min_labeled_samples);
        if let Some(entries) = self.gazetteers.get(&recommender.id) {
            engine.pretrain(entries.value().clone());
        }
        Ok(Box::new(engine))
    }
}
