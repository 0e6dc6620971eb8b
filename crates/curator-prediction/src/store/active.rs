use curator_core::models::{LayerId, Recommender};
use dashmap::DashMap;

/// Recommenders the selection task activated, per (user, layer).
#[derive(Debug, Default)]
pub struct ActiveRecommenders {
    active: DashMap<(String, LayerId), Vec<Recommender>>,
}

impl ActiveRecommenders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active recommenders of a layer, empty when none were selected.
    pub fn get(&self, user: &str, layer: LayerId) -> Vec<Recommender> {
        self.active
            .get(&(user.to_string(), layer))
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    /// Replace the active set of a layer.
    pub fn set(&self, user: &str, layer: LayerId, recommenders: Vec<Recommender>) {
        self.active.insert((user.to_string(), layer), recommenders);
    }

    pub fn remove_user(&self, user: &str) {
        self.active.retain(|(u, _), _| u != user);
    }
}
