use serde::{Deserialize, Serialize};

pub type ProjectId = u64;
pub type DocumentId = u64;

/// A project groups documents, layers and recommenders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
}

/// Handle of a source document. Its text and annotations live in the
/// [`AnnotationState`](super::AnnotationState) loaded per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub project_id: ProjectId,
    pub name: String,
}
