//! Concurrent stores shared by all tasks of a service.
//!
//! Every store is keyed by user, so runs for different users never touch
//! the same entry.

mod active;
mod context_store;
mod prediction_store;

pub use active::ActiveRecommenders;
pub use context_store::ContextStore;
pub use prediction_store::PredictionStore;

/// The three stores a task needs, bundled.
#[derive(Debug, Default)]
pub struct Stores {
    pub contexts: ContextStore,
    pub active: ActiveRecommenders,
    pub predictions: PredictionStore,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything held for `user`.
    pub fn forget_user(&self, user: &str) {
        self.contexts.remove_user(user);
        self.active.remove_user(user);
        self.predictions.remove_user(user);
    }
}
