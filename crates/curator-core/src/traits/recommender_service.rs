use crate::errors::CuratorResult;
use crate::models::{Layer, Recommender, RecommenderId};

/// Recommender configuration storage.
pub trait IRecommenderService: Send + Sync {
    /// All recommenders bound to `layer`, enabled or not.
    fn list_recommenders(&self, layer: &Layer) -> CuratorResult<Vec<Recommender>>;

    /// Latest configuration of a recommender, `None` if it was deleted.
    fn get_recommender(&self, id: RecommenderId) -> CuratorResult<Option<Recommender>>;
}
