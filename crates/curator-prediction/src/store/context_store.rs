use std::sync::Arc;

use curator_core::models::RecommenderId;
use curator_core::RecommenderContext;
use dashmap::DashMap;

/// Trained contexts per (user, recommender).
///
/// A context is replaced as a whole after training and read through a
/// shared handle, so predictions never observe a half-trained model.
#[derive(Debug, Default)]
pub struct ContextStore {
    contexts: DashMap<(String, RecommenderId), Arc<RecommenderContext>>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context of a recommender, or an empty one that is not ready.
    pub fn get(&self, user: &str, recommender: RecommenderId) -> Arc<RecommenderContext> {
        self.contexts
            .get(&(user.to_string(), recommender))
            .map(|c| Arc::clone(c.value()))
            .unwrap_or_default()
    }

    pub fn put(&self, user: &str, recommender: RecommenderId, context: RecommenderContext) {
        self.contexts
            .insert((user.to_string(), recommender), Arc::new(context));
    }

    pub fn remove(&self, user: &str, recommender: RecommenderId) -> bool {
        self.contexts
            .remove(&(user.to_string(), recommender))
            .is_some()
    }

    pub fn remove_user(&self, user: &str) {
        self.contexts.retain(|(u, _), _| u != user);
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
