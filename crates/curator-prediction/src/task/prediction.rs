use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use curator_core::errors::CuratorResult;
use curator_core::models::{
    Document, Layer, LayerId, LearningRecord, Predictions, ProjectId, Recommender,
    SuggestionGroup,
};
use curator_core::{CancellationToken, RecommenderContext};
use curator_observability::{prediction_span, recommender_span, TaskMetrics};
use tracing::{debug, error, info};

use super::{elapsed_ms, enabled_layers, load_document, LoadedDocument, PredictionOutcome};
use crate::extraction::extract_suggestions;
use crate::report::{InvocationRecord, RecommenderOutcome, SkipReason, TaskReport};
use crate::services::RecommendationServices;
use crate::store::Stores;
use crate::visibility::calculate_visibility;

/// Predicts suggestions for every document of a project with the user's
/// active recommenders and publishes them as one snapshot.
#[derive(Debug, Clone)]
pub struct PredictionTask {
    pub user: String,
    pub project: ProjectId,
    pub trigger: String,
}

/// Learning records fetched at most once per layer and run.
#[derive(Default)]
struct RecordCache {
    by_layer: HashMap<LayerId, Vec<LearningRecord>>,
}

impl RecordCache {
    fn get(
        &mut self,
        services: &RecommendationServices,
        user: &str,
        layer: LayerId,
    ) -> CuratorResult<&[LearningRecord]> {
        if !self.by_layer.contains_key(&layer) {
            let records = services.learning_records.list_records(user, layer)?;
            self.by_layer.insert(layer, records);
        }
        Ok(self.by_layer.get(&layer).map(Vec::as_slice).unwrap_or_default())
    }
}

impl PredictionTask {
    pub fn new(user: impl Into<String>, project: ProjectId, trigger: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            project,
            trigger: trigger.into(),
        }
    }

    /// Run to completion or cancellation.
    ///
    /// Only the project's document and layer listings can fail the run.
    /// Everything else is recorded in the report and skipped. A cancelled
    /// run publishes nothing and returns what it had aggregated so far.
    pub fn run(
        &self,
        services: &RecommendationServices,
        stores: &Stores,
        metrics: &TaskMetrics,
        cancel: &CancellationToken,
    ) -> CuratorResult<PredictionOutcome> {
        let span = prediction_span!(self.user, self.project);
        let _entered = span.enter();

        info!(trigger = %self.trigger, "starting prediction");
        let start = Instant::now();
        let mut report = TaskReport::new("prediction", &self.user, self.project, &self.trigger);
        let mut model = Predictions::new(self.project, &self.user);
        let mut records = RecordCache::default();

        let documents = services.documents.list_documents(self.project)?;
        let layers = enabled_layers(services, self.project)?;

        'documents: for document in &documents {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            // Loaded on first use so documents without runnable
            // recommenders are never read.
            let mut loaded: Option<LoadedDocument> = None;

            for layer in &layers {
                for active in stores.active.get(&self.user, layer.id) {
                    if cancel.is_cancelled() {
                        report.cancelled = true;
                        break 'documents;
                    }

                    let (recommender, context) =
                        match self.resolve(services, stores, &active, document) {
                            Ok(resolved) => resolved,
                            Err(outcome) => {
                                if matches!(outcome, RecommenderOutcome::Skipped { .. }) {
                                    metrics.record_skip();
                                }
                                report.record(invocation(document, layer, &active, outcome));
                                continue;
                            }
                        };

                    if loaded.is_none() {
                        match load_document(services, document, &self.user) {
                            Ok(doc) => loaded = Some(doc),
                            Err(e) => {
                                error!(
                                    document = %document.name,
                                    error = %e,
                                    "cannot prepare annotation state - skipping document"
                                );
                                report.document_failed(&document.name, e.to_string());
                                metrics.record_document(true);
                                continue 'documents;
                            }
                        }
                    }
                    let Some(doc) = loaded.as_mut() else {
                        continue 'documents;
                    };

                    let rec_span = recommender_span!(recommender.name, document.name);
                    let _rec = rec_span.enter();

                    let outcome = match self.apply(
                        services,
                        &mut records,
                        &recommender,
                        &context,
                        layer,
                        document,
                        doc,
                    ) {
                        Ok(groups) => {
                            let suggestions: usize = groups.iter().map(SuggestionGroup::len).sum();
                            model.put_groups(layer.id, groups);
                            metrics.record_invocation(false, suggestions);
                            RecommenderOutcome::Predicted { suggestions }
                        }
                        Err(e) => {
                            error!(
                                recommender = %recommender.name,
                                recommender_id = recommender.id,
                                document = %document.name,
                                error = %e,
                                "error applying recommender - skipping recommender"
                            );
                            metrics.record_invocation(true, 0);
                            RecommenderOutcome::Failed {
                                reason: e.to_string(),
                            }
                        }
                    };
                    report.record(invocation(document, layer, &recommender, outcome));
                }
            }

            if loaded.is_some() {
                metrics.record_document(false);
            }
        }

        report.duration_ms = elapsed_ms(start);
        let predictions = Arc::new(model);
        metrics.record_run(report.cancelled);

        if report.cancelled {
            info!(
                duration_ms = report.duration_ms,
                "prediction cancelled - keeping previous predictions"
            );
        } else {
            stores.predictions.publish(Arc::clone(&predictions));
            report.published = true;
            info!(
                duration_ms = report.duration_ms,
                suggestions = predictions.suggestion_count(),
                failures = report.failures().count(),
                "prediction complete"
            );
        }

        Ok(PredictionOutcome {
            report,
            predictions,
        })
    }

    /// Latest configuration and a ready context, or why the recommender
    /// cannot run.
    fn resolve(
        &self,
        services: &RecommendationServices,
        stores: &Stores,
        active: &Recommender,
        document: &Document,
    ) -> Result<(Recommender, Arc<RecommenderContext>), RecommenderOutcome> {
        // The active list may hold a stale configuration.
        let recommender = match services.recommenders.get_recommender(active.id) {
            Ok(Some(recommender)) => recommender,
            Ok(None) => {
                info!(recommender = %active.name, "recommender no longer available - skipping");
                return Err(RecommenderOutcome::Skipped {
                    reason: SkipReason::NoLongerAvailable,
                });
            }
            Err(e) => {
                error!(recommender = %active.name, error = %e, "cannot fetch recommender - skipping");
                return Err(RecommenderOutcome::Failed {
                    reason: e.to_string(),
                });
            }
        };

        if !recommender.enabled {
            debug!(recommender = %recommender.name, "disabled - skipping");
            return Err(RecommenderOutcome::Skipped {
                reason: SkipReason::Disabled,
            });
        }

        let context = stores.contexts.get(&self.user, recommender.id);
        if !context.is_ready_for_prediction() {
            info!(
                recommender = %recommender.name,
                recommender_id = recommender.id,
                document = %document.name,
                "context not ready yet - skipping recommender"
            );
            return Err(RecommenderOutcome::Skipped {
                reason: SkipReason::ContextNotReady,
            });
        }

        Ok((recommender, context))
    }

    #[allow(clippy::too_many_arguments)]
    fn apply(
        &self,
        services: &RecommendationServices,
        records: &mut RecordCache,
        recommender: &Recommender,
        context: &RecommenderContext,
        layer: &Layer,
        document: &Document,
        doc: &mut LoadedDocument,
    ) -> CuratorResult<Vec<SuggestionGroup>> {
        let factory = services.factories.get(&recommender.tool)?;
        let engine = factory.build(recommender)?;

        // Predictions are not additive across runs.
        let removed = doc
            .workspace
            .remove_predictions(engine.predicted_layer(), engine.predicted_feature());
        if removed > 0 {
            debug!(removed, "removed stale predictions");
        }

        engine.predict(context, &mut doc.workspace)?;

        let suggestions =
            extract_suggestions(&doc.workspace, &document.name, recommender, engine.as_ref());
        let mut groups = SuggestionGroup::group(suggestions);

        // Compared against the human annotations only.
        let records = records.get(services, &self.user, layer.id)?;
        let window = doc.original.full_window();
        calculate_visibility(&doc.original, records, layer, groups.iter_mut(), window);

        Ok(groups)
    }
}

fn invocation(
    document: &Document,
    layer: &Layer,
    recommender: &Recommender,
    outcome: RecommenderOutcome,
) -> InvocationRecord {
    InvocationRecord {
        document: Some(document.name.clone()),
        layer_id: layer.id,
        recommender_id: recommender.id,
        recommender_name: recommender.name.clone(),
        outcome,
    }
}
