use std::time::Instant;

use curator_core::errors::CuratorResult;
use curator_core::models::{AnnotationState, LayerId, ProjectId, Recommender};
use curator_core::CancellationToken;
use curator_observability::{selection_span, TaskMetrics};
use curator_stringmatch::PercentageSplitter;
use tracing::{debug, error, info};

use super::training::{failed, skipped, step};
use super::{elapsed_ms, enabled_layers, load_states};
use crate::report::{RecommenderOutcome, SkipReason, TaskReport};
use crate::services::RecommendationServices;
use crate::store::Stores;

/// Evaluates the recommenders of every enabled layer and stores the ones
/// that qualify as the user's active set.
///
/// A recommender qualifies when it is always selected or its evaluation
/// score reaches its threshold. A failed evaluation deactivates it.
#[derive(Debug, Clone)]
pub struct SelectionTask {
    pub user: String,
    pub project: ProjectId,
    pub trigger: String,
    pub test_percentage: f64,
}

impl SelectionTask {
    pub fn new(
        user: impl Into<String>,
        project: ProjectId,
        trigger: impl Into<String>,
        test_percentage: f64,
    ) -> Self {
        Self {
            user: user.into(),
            project,
            trigger: trigger.into(),
            test_percentage,
        }
    }

    /// A cancelled run leaves every layer's previous active set in place.
    pub fn run(
        &self,
        services: &RecommendationServices,
        stores: &Stores,
        metrics: &TaskMetrics,
        cancel: &CancellationToken,
    ) -> CuratorResult<TaskReport> {
        let span = selection_span!(self.user, self.project);
        let _entered = span.enter();

        info!(trigger = %self.trigger, "starting recommender selection");
        let start = Instant::now();
        let mut report = TaskReport::new("selection", &self.user, self.project, &self.trigger);
        let layers = enabled_layers(services, self.project)?;
        let mut states: Option<Vec<AnnotationState>> = None;
        let mut selections: Vec<(LayerId, Vec<Recommender>)> = Vec::with_capacity(layers.len());

        'layers: for layer in &layers {
            let recommenders = match services.recommenders.list_recommenders(layer) {
                Ok(recommenders) => recommenders,
                Err(e) => {
                    error!(layer = %layer.name, error = %e, "cannot list recommenders - skipping layer");
                    continue;
                }
            };

            let mut active = Vec::new();
            for recommender in recommenders {
                if cancel.is_cancelled() {
                    report.cancelled = true;
                    break 'layers;
                }

                if !recommender.enabled {
                    debug!(recommender = %recommender.name, "disabled - skipping");
                    report.record(step(layer, &recommender, skipped(SkipReason::Disabled)));
                    continue;
                }

                if recommender.always_selected {
                    debug!(recommender = %recommender.name, "always selected - activating");
                    metrics.record_evaluation(true);
                    report.record(step(layer, &recommender, RecommenderOutcome::AlwaysSelected));
                    active.push(recommender);
                    continue;
                }

                if states.is_none() {
                    states = Some(load_states(services, self.project, &self.user, &mut report)?);
                }
                let data = states.as_deref().unwrap_or_default();

                let outcome = match self.evaluate(services, &recommender, data) {
                    Ok(score) => {
                        let activated = score >= recommender.threshold;
                        info!(
                            recommender = %recommender.name,
                            score,
                            threshold = recommender.threshold,
                            activated,
                            "evaluated recommender"
                        );
                        metrics.record_evaluation(activated);
                        RecommenderOutcome::Evaluated { score, activated }
                    }
                    Err(e) => {
                        error!(
                            recommender = %recommender.name,
                            recommender_id = recommender.id,
                            error = %e,
                            "evaluation failed - deactivating recommender"
                        );
                        metrics.record_evaluation(false);
                        failed(&e)
                    }
                };
                let activated = matches!(
                    outcome,
                    RecommenderOutcome::Evaluated {
                        activated: true,
                        ..
                    }
                );
                report.record(step(layer, &recommender, outcome));
                if activated {
                    active.push(recommender);
                }
            }
            selections.push((layer.id, active));
        }

        if !report.cancelled {
            for (layer_id, active) in selections {
                stores.active.set(&self.user, layer_id, active);
            }
            report.published = true;
        }

        report.duration_ms = elapsed_ms(start);
        info!(duration_ms = report.duration_ms, "selection finished");
        Ok(report)
    }

    fn evaluate(
        &self,
        services: &RecommendationServices,
        recommender: &Recommender,
        states: &[AnnotationState],
    ) -> CuratorResult<f64> {
        let engine = services.factories.get(&recommender.tool)?.build(recommender)?;
        let mut splitter = PercentageSplitter::new(self.test_percentage);
        engine.evaluate(states, &mut splitter)
    }
}
