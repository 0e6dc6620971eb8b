//! Per-(user, recommender) store for a trained model.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::{CuratorError, CuratorResult, RecommendationError};

/// Typed, write-once-per-key store scoped to one (user, recommender) pair.
///
/// Created empty when training starts, filled by `train`, and read by every
/// later `predict` until the next training run replaces the whole context.
#[derive(Clone, Default)]
pub struct RecommenderContext {
    values: HashMap<&'static str, Arc<dyn Any + Send + Sync>>,
    ready_for_prediction: bool,
    trained_at: Option<DateTime<Utc>>,
}

impl RecommenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`. Fails if the key already holds a value.
    pub fn put<T: Any + Send + Sync>(&mut self, key: &'static str, value: T) -> CuratorResult<()> {
        if self.values.contains_key(key) {
            return Err(CuratorError::ContextKeyTaken {
                key: key.to_string(),
            });
        }
        self.values.insert(key, Arc::new(value));
        Ok(())
    }

    /// Fetch the value under `key` as `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &'static str) -> CuratorResult<&T> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| RecommendationError::MissingModel {
                key: key.to_string(),
            })?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| {
                RecommendationError::ModelTypeMismatch {
                    key: key.to_string(),
                }
                .into()
            })
    }

    pub fn contains(&self, key: &'static str) -> bool {
        self.values.contains_key(key)
    }

    pub fn mark_ready_for_prediction(&mut self) {
        self.ready_for_prediction = true;
        self.trained_at = Some(Utc::now());
    }

    pub fn is_ready_for_prediction(&self) -> bool {
        self.ready_for_prediction
    }

    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.trained_at
    }
}

impl std::fmt::Debug for RecommenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&&str> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("RecommenderContext")
            .field("keys", &keys)
            .field("ready_for_prediction", &self.ready_for_prediction)
            .field("trained_at", &self.trained_at)
            .finish()
    }
}
