use crate::errors::CuratorResult;
use crate::models::{AnnotationState, Document, ProjectId};

/// Document and annotation storage, owned by the hosting system.
pub trait IDocumentService: Send + Sync {
    fn list_documents(&self, project: ProjectId) -> CuratorResult<Vec<Document>>;

    fn read_annotation_state(&self, document: &Document, user: &str)
        -> CuratorResult<AnnotationState>;

    /// Bring a loaded state up to the current layer schema.
    fn upgrade_if_needed(
        &self,
        state: &mut AnnotationState,
        document: &Document,
        user: &str,
    ) -> CuratorResult<()>;

    /// Derive an independent working copy of a state.
    fn clone_state(
        &self,
        state: &AnnotationState,
        _document: &Document,
    ) -> CuratorResult<AnnotationState> {
        Ok(state.clone())
    }
}
