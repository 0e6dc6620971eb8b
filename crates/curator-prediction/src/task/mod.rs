//! Tasks run on behalf of one user in one project.
//!
//! Selection → Training → Prediction. Each task isolates failures per
//! recommender and per document and reports them in a [`TaskReport`].

mod prediction;
mod selection;
mod training;

use std::sync::Arc;

use curator_core::errors::CuratorResult;
use curator_core::models::{AnnotationState, Document, Layer, Predictions, ProjectId};
use tracing::{debug, error};

pub use prediction::PredictionTask;
pub use selection::SelectionTask;
pub use training::TrainingTask;

use crate::report::TaskReport;
use crate::services::RecommendationServices;

/// Result of a prediction run.
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub report: TaskReport,
    /// Published snapshot, or the partial result of a cancelled run.
    pub predictions: Arc<Predictions>,
}

/// A document's human annotations and the workspace engines write into.
#[derive(Debug)]
pub(crate) struct LoadedDocument {
    pub original: AnnotationState,
    pub workspace: AnnotationState,
}

/// Read, upgrade, and clone the state of one document.
pub(crate) fn load_document(
    services: &RecommendationServices,
    document: &Document,
    user: &str,
) -> CuratorResult<LoadedDocument> {
    let mut original = services.documents.read_annotation_state(document, user)?;
    services
        .documents
        .upgrade_if_needed(&mut original, document, user)?;
    let workspace = services.documents.clone_state(&original, document)?;
    Ok(LoadedDocument {
        original,
        workspace,
    })
}

/// Upgraded states of every loadable document. Failures are logged and
/// recorded; the document is left out.
pub(crate) fn load_states(
    services: &RecommendationServices,
    project: ProjectId,
    user: &str,
    report: &mut TaskReport,
) -> CuratorResult<Vec<AnnotationState>> {
    let documents = services.documents.list_documents(project)?;
    let mut states = Vec::with_capacity(documents.len());
    for document in &documents {
        let loaded = services
            .documents
            .read_annotation_state(document, user)
            .and_then(|mut state| {
                services
                    .documents
                    .upgrade_if_needed(&mut state, document, user)
                    .map(|()| state)
            });
        match loaded {
            Ok(state) => states.push(state),
            Err(e) => {
                error!(
                    user,
                    project,
                    document = %document.name,
                    error = %e,
                    "cannot load annotation state - skipping document"
                );
                report.document_failed(&document.name, e.to_string());
            }
        }
    }
    Ok(states)
}

/// Enabled layers of a project.
pub(crate) fn enabled_layers(
    services: &RecommendationServices,
    project: ProjectId,
) -> CuratorResult<Vec<Layer>> {
    Ok(services
        .schema
        .list_layers(project)?
        .into_iter()
        .filter(|layer| {
            if !layer.enabled {
                debug!(layer = %layer.name, "layer disabled - skipping");
            }
            layer.enabled
        })
        .collect())
}

fn elapsed_ms(start: std::time::Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
