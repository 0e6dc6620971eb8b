use crate::context::RecommenderContext;
use crate::errors::CuratorResult;
use crate::models::{AnnotationState, Feature, Layer, Recommender};

use super::IDataSplitter;

/// Capability set shared by all recommendation engines.
pub trait IRecommendationEngine: Send + Sync {
    /// Layer name of the spans this engine writes.
    fn predicted_layer(&self) -> &str;

    /// Feature under which this engine writes its label.
    fn predicted_feature(&self) -> &str;

    /// Whether written spans carry a confidence score.
    fn produces_scores(&self) -> bool {
        true
    }

    /// Learn from the given states and store the model in `context`.
    fn train(&self, context: &mut RecommenderContext, states: &[AnnotationState])
        -> CuratorResult<()>;

    /// Write predicted spans into `state`.
    fn predict(&self, context: &RecommenderContext, state: &mut AnnotationState)
        -> CuratorResult<()>;

    /// Score the engine on a train/test split of `states`. Never below 0.
    fn evaluate(&self, states: &[AnnotationState], splitter: &mut dyn IDataSplitter)
        -> CuratorResult<f64>;
}

/// Builds engines for one tool id.
pub trait IRecommenderFactory: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Whether this tool can serve the given layer/feature.
    fn accepts(&self, layer: &Layer, feature: &Feature) -> bool;

    fn build(&self, recommender: &Recommender) -> CuratorResult<Box<dyn IRecommendationEngine>>;
}
