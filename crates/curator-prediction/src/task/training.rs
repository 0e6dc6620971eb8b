use std::time::Instant;

use curator_core::errors::CuratorResult;
use curator_core::models::{AnnotationState, Layer, ProjectId, Recommender};
use curator_core::{CancellationToken, RecommenderContext};
use curator_observability::{training_span, TaskMetrics};
use tracing::{debug, error, info};

use super::{elapsed_ms, enabled_layers, load_states};
use crate::report::{InvocationRecord, RecommenderOutcome, SkipReason, TaskReport};
use crate::services::RecommendationServices;
use crate::store::Stores;

/// Trains every active recommender of a user on all of the user's
/// documents and stores the fresh contexts.
#[derive(Debug, Clone)]
pub struct TrainingTask {
    pub user: String,
    pub project: ProjectId,
    pub trigger: String,
}

impl TrainingTask {
    pub fn new(user: impl Into<String>, project: ProjectId, trigger: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            project,
            trigger: trigger.into(),
        }
    }

    /// A failed training keeps the recommender's previous context.
    pub fn run(
        &self,
        services: &RecommendationServices,
        stores: &Stores,
        metrics: &TaskMetrics,
        cancel: &CancellationToken,
    ) -> CuratorResult<TaskReport> {
        let span = training_span!(self.user, self.project);
        let _entered = span.enter();

        info!(trigger = %self.trigger, "starting training");
        let start = Instant::now();
        let mut report = TaskReport::new("training", &self.user, self.project, &self.trigger);
        let layers = enabled_layers(services, self.project)?;

        // Loaded once, on the first recommender that needs them.
        let mut states: Option<Vec<AnnotationState>> = None;

        'layers: for layer in &layers {
            for active in stores.active.get(&self.user, layer.id) {
                if cancel.is_cancelled() {
                    report.cancelled = true;
                    break 'layers;
                }

                let recommender = match services.recommenders.get_recommender(active.id) {
                    Ok(Some(r)) if r.enabled => r,
                    Ok(Some(r)) => {
                        debug!(recommender = %r.name, "disabled - skipping");
                        report.record(step(layer, &r, skipped(SkipReason::Disabled)));
                        continue;
                    }
                    Ok(None) => {
                        info!(recommender = %active.name, "recommender no longer available - skipping");
                        report.record(step(layer, &active, skipped(SkipReason::NoLongerAvailable)));
                        continue;
                    }
                    Err(e) => {
                        error!(recommender = %active.name, error = %e, "cannot fetch recommender - skipping");
                        report.record(step(layer, &active, failed(&e)));
                        continue;
                    }
                };

                if states.is_none() {
                    states = Some(load_states(services, self.project, &self.user, &mut report)?);
                }
                let training_data = states.as_deref().unwrap_or_default();

                let outcome = match train(services, &recommender, training_data) {
                    Ok(context) => {
                        stores.contexts.put(&self.user, recommender.id, context);
                        metrics.record_training(false);
                        info!(
                            recommender = %recommender.name,
                            documents = training_data.len(),
                            "training complete"
                        );
                        RecommenderOutcome::Trained
                    }
                    Err(e) => {
                        metrics.record_training(true);
                        error!(
                            recommender = %recommender.name,
                            recommender_id = recommender.id,
                            error = %e,
                            "training failed - keeping previous model"
                        );
                        failed(&e)
                    }
                };
                report.record(step(layer, &recommender, outcome));
            }
        }

        report.duration_ms = elapsed_ms(start);
        report.published = !report.cancelled;
        info!(duration_ms = report.duration_ms, "training finished");
        Ok(report)
    }
}

fn train(
    services: &RecommendationServices,
    recommender: &Recommender,
    states: &[AnnotationState],
) -> CuratorResult<RecommenderContext> {
    let engine = services.factories.get(&recommender.tool)?.build(recommender)?;
    let mut context = RecommenderContext::new();
    engine.train(&mut context, states)?;
    Ok(context)
}

pub(super) fn step(layer: &Layer, recommender: &Recommender, outcome: RecommenderOutcome) -> InvocationRecord {
    InvocationRecord {
        document: None,
        layer_id: layer.id,
        recommender_id: recommender.id,
        recommender_name: recommender.name.clone(),
        outcome,
    }
}

pub(super) fn skipped(reason: SkipReason) -> RecommenderOutcome {
    RecommenderOutcome::Skipped { reason }
}

pub(super) fn failed(e: &curator_core::CuratorError) -> RecommenderOutcome {
    RecommenderOutcome::Failed {
        reason: e.to_string(),
    }
}
