use std::sync::Arc;

use curator_core::models::{Predictions, ProjectId};
use dashmap::DashMap;

/// Latest published predictions per (user, project).
///
/// Publishing swaps the whole snapshot; readers hold on to the one they got.
#[derive(Debug, Default)]
pub struct PredictionStore {
    snapshots: DashMap<(String, ProjectId), Arc<Predictions>>,
}

impl PredictionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user: &str, project: ProjectId) -> Option<Arc<Predictions>> {
        self.snapshots
            .get(&(user.to_string(), project))
            .map(|p| Arc::clone(p.value()))
    }

    /// Publish a snapshot, returning the one it replaces.
    pub fn publish(&self, predictions: Arc<Predictions>) -> Option<Arc<Predictions>> {
        self.snapshots.insert(
            (predictions.user.clone(), predictions.project_id),
            predictions,
        )
    }

    /// Modify the current snapshot in place. Readers holding the old
    /// snapshot keep seeing it unchanged. Returns `None` when nothing was
    /// published yet.
    pub fn update<R>(
        &self,
        user: &str,
        project: ProjectId,
        f: impl FnOnce(&mut Predictions) -> R,
    ) -> Option<R> {
        let mut entry = self.snapshots.get_mut(&(user.to_string(), project))?;
        Some(f(Arc::make_mut(entry.value_mut())))
    }

    pub fn remove_user(&self, user: &str) {
        self.snapshots.retain(|(u, _), _| u != user);
    }
}
