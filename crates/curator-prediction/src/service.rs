//! Façade over the tasks and stores of one deployment.

use std::sync::Arc;

use curator_core::config::CuratorConfig;
use curator_core::errors::{ConfigError, CuratorError, CuratorResult};
use curator_core::models::{LayerId, Offset, Predictions, ProjectId, RecommenderId};
use curator_core::{CancellationToken, RecommenderContext};
use curator_observability::{MetricsSnapshot, TaskMetrics};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::report::TaskReport;
use crate::services::RecommendationServices;
use crate::store::Stores;
use crate::task::{PredictionOutcome, PredictionTask, SelectionTask, TrainingTask};
use crate::visibility::calculate_visibility;

/// Entry point for hosts: runs selection, training, and prediction for
/// users and serves the published predictions.
pub struct PredictionService {
    services: RecommendationServices,
    stores: Arc<Stores>,
    metrics: Arc<TaskMetrics>,
    config: CuratorConfig,
    pool: rayon::ThreadPool,
}

impl PredictionService {
    pub fn new(services: RecommendationServices, config: CuratorConfig) -> CuratorResult<Self> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.prediction.max_parallel_runs)
            .thread_name(|i| format!("curator-run-{i}"))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "prediction.max_parallel_runs".into(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            services,
            stores: Arc::new(Stores::new()),
            metrics: Arc::new(TaskMetrics::new()),
            config,
            pool,
        })
    }

    pub fn stores(&self) -> &Arc<Stores> {
        &self.stores
    }

    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn trigger(&self) -> &str {
        &self.config.prediction.default_trigger
    }

    /// Evaluate recommenders and store the user's active set.
    pub fn select(&self, user: &str, project: ProjectId) -> CuratorResult<TaskReport> {
        SelectionTask::new(
            user,
            project,
            self.trigger(),
            self.config.evaluation.test_percentage,
        )
        .run(&self.services, &self.stores, &self.metrics, &CancellationToken::new())
    }

    /// Train the user's active recommenders.
    pub fn train(&self, user: &str, project: ProjectId) -> CuratorResult<TaskReport> {
        TrainingTask::new(user, project, self.trigger()).run(
            &self.services,
            &self.stores,
            &self.metrics,
            &CancellationToken::new(),
        )
    }

    pub fn predict(&self, user: &str, project: ProjectId) -> CuratorResult<PredictionOutcome> {
        self.predict_with(
            &PredictionTask::new(user, project, self.trigger()),
            &CancellationToken::new(),
        )
    }

    /// Run a prediction task that the caller can cancel.
    pub fn predict_with(
        &self,
        task: &PredictionTask,
        cancel: &CancellationToken,
    ) -> CuratorResult<PredictionOutcome> {
        task.run(&self.services, &self.stores, &self.metrics, cancel)
    }

    /// Selection, training, and prediction in sequence.
    pub fn run_cycle(
        &self,
        user: &str,
        project: ProjectId,
        cancel: &CancellationToken,
    ) -> CuratorResult<PredictionOutcome> {
        let trigger = self.trigger();
        SelectionTask::new(user, project, trigger, self.config.evaluation.test_percentage)
            .run(&self.services, &self.stores, &self.metrics, cancel)?;
        cancel.check()?;
        TrainingTask::new(user, project, trigger).run(
            &self.services,
            &self.stores,
            &self.metrics,
            cancel,
        )?;
        cancel.check()?;
        self.predict_with(&PredictionTask::new(user, project, trigger), cancel)
    }

    /// One prediction run per user, in parallel. Results keep the order of
    /// `users`.
    pub fn predict_users(
        &self,
        users: &[String],
        project: ProjectId,
    ) -> Vec<(String, CuratorResult<PredictionOutcome>)> {
        info!(users = users.len(), project, "predicting for users");
        self.pool.install(|| {
            users
                .par_iter()
                .map(|user| {
                    let task = PredictionTask::new(user.clone(), project, self.trigger());
                    (user.clone(), self.predict_with(&task, &CancellationToken::new()))
                })
                .collect()
        })
    }

    /// Latest published predictions.
    pub fn predictions(&self, user: &str, project: ProjectId) -> Option<Arc<Predictions>> {
        self.stores.predictions.get(user, project)
    }

    /// Re-run visibility for one document and layer of the published
    /// snapshot over `window`, against the document's current annotations.
    /// Returns the number of visible suggestions of that document and layer.
    pub fn recompute_visibility(
        &self,
        user: &str,
        project: ProjectId,
        layer_id: LayerId,
        document_name: &str,
        window: Offset,
    ) -> CuratorResult<usize> {
        let layer = self
            .services
            .schema
            .get_layer(layer_id)?
            .ok_or(CuratorError::LayerNotFound { id: layer_id })?;
        let document = self
            .services
            .documents
            .list_documents(project)?
            .into_iter()
            .find(|d| d.name == document_name)
            .ok_or_else(|| CuratorError::DocumentNotFound {
                name: document_name.to_string(),
            })?;

        let mut original = self.services.documents.read_annotation_state(&document, user)?;
        self.services
            .documents
            .upgrade_if_needed(&mut original, &document, user)?;
        let records = self.services.learning_records.list_records(user, layer_id)?;

        let visible = self.stores.predictions.update(user, project, |predictions| {
            let groups = predictions
                .groups_mut(layer_id)
                .filter(|g| g.document_name() == document_name);
            calculate_visibility(&original, &records, &layer, groups, window);
            predictions.visible_count(layer_id, document_name)
        });

        debug!(
            user,
            layer = %layer.name,
            document = document_name,
            window = %window,
            visible = visible.unwrap_or(0),
            "recomputed visibility"
        );
        Ok(visible.unwrap_or(0))
    }

    /// Trained context of a recommender for `user`. The context is empty and
    /// not ready until a training run for that user succeeded.
    pub fn context(
        &self,
        user: &str,
        recommender: RecommenderId,
    ) -> CuratorResult<Arc<RecommenderContext>> {
        if self.services.recommenders.get_recommender(recommender)?.is_none() {
            return Err(CuratorError::RecommenderNotFound { id: recommender });
        }
        Ok(self.stores.contexts.get(user, recommender))
    }

    /// Drop the active recommenders, trained contexts, and published
    /// predictions of `user`, e.g. when their session ends.
    pub fn forget_user(&self, user: &str) {
        self.stores.forget_user(user);
        info!(user, "forgot user state");
    }
}
