//! In-memory implementations of the collaborator traits.
//!
//! Each service can be told to fail for specific inputs so tests can
//! exercise error isolation.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use curator_core::errors::{CuratorError, CuratorResult, DocumentError};
use curator_core::models::{
    AnnotationState, Document, DocumentId, Layer, LayerId, LearningRecord, ProjectId,
    Recommender, RecommenderId,
};
use curator_core::traits::{
    IDocumentService, ILearningRecordService, IRecommenderService, ISchemaService,
};

use crate::builders::PROJECT;

#[derive(Debug)]
struct StoredDocument {
    document: Document,
    /// State every user sees unless overridden.
    shared: AnnotationState,
    per_user: BTreeMap<String, AnnotationState>,
}

#[derive(Debug, Default)]
pub struct InMemoryDocumentService {
    documents: Mutex<Vec<StoredDocument>>,
    failing_reads: Mutex<HashSet<String>>,
    failing_upgrades: Mutex<HashSet<String>>,
    failing_clones: Mutex<HashSet<String>>,
    reads: AtomicUsize,
    upgrades: AtomicUsize,
}

impl InMemoryDocumentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document in [`PROJECT`] whose state every user shares.
    pub fn add_document(&self, name: &str, state: AnnotationState) -> Document {
        let mut documents = self.documents.lock().unwrap();
        let document = Document {
            id: documents.len() as DocumentId + 1,
            project_id: PROJECT,
            name: name.to_string(),
        };
        documents.push(StoredDocument {
            document: document.clone(),
            shared: state,
            per_user: BTreeMap::new(),
        });
        document
    }

    /// Give `user` their own state of an existing document.
    pub fn set_user_state(&self, name: &str, user: &str, state: AnnotationState) {
        let mut documents = self.documents.lock().unwrap();
        let stored = documents
            .iter_mut()
            .find(|d| d.document.name == name)
            .unwrap_or_else(|| panic!("unknown document {name}"));
        stored.per_user.insert(user.to_string(), state);
    }

    pub fn fail_reads_of(&self, name: &str) {
        self.failing_reads.lock().unwrap().insert(name.to_string());
    }

    pub fn fail_upgrades_of(&self, name: &str) {
        self.failing_upgrades.lock().unwrap().insert(name.to_string());
    }

    pub fn fail_clones_of(&self, name: &str) {
        self.failing_clones.lock().unwrap().insert(name.to_string());
    }

    /// Number of successful state reads so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn upgrade_count(&self) -> usize {
        self.upgrades.load(Ordering::SeqCst)
    }
}

impl IDocumentService for InMemoryDocumentService {
    fn list_documents(&self, project: ProjectId) -> CuratorResult<Vec<Document>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.document.project_id == project)
            .map(|d| d.document.clone())
            .collect())
    }

    fn read_annotation_state(
        &self,
        document: &Document,
        user: &str,
    ) -> CuratorResult<AnnotationState> {
        if self.failing_reads.lock().unwrap().contains(&document.name) {
            return Err(DocumentError::ReadFailed {
                document: document.name.clone(),
                user: user.to_string(),
                reason: "injected failure".into(),
            }
            .into());
        }
        let documents = self.documents.lock().unwrap();
        let stored = documents
            .iter()
            .find(|d| d.document.id == document.id)
            .ok_or_else(|| CuratorError::DocumentNotFound {
                name: document.name.clone(),
            })?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(stored
            .per_user
            .get(user)
            .unwrap_or(&stored.shared)
            .clone())
    }

    fn upgrade_if_needed(
        &self,
        _state: &mut AnnotationState,
        document: &Document,
        user: &str,
    ) -> CuratorResult<()> {
        if self.failing_upgrades.lock().unwrap().contains(&document.name) {
            return Err(DocumentError::UpgradeFailed {
                document: document.name.clone(),
                user: user.to_string(),
                reason: "injected failure".into(),
            }
            .into());
        }
        self.upgrades.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clone_state(
        &self,
        state: &AnnotationState,
        document: &Document,
    ) -> CuratorResult<AnnotationState> {
        if self.failing_clones.lock().unwrap().contains(&document.name) {
            return Err(DocumentError::CloneFailed {
                document: document.name.clone(),
                reason: "injected failure".into(),
            }
            .into());
        }
        Ok(state.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySchemaService {
    layers: Mutex<Vec<Layer>>,
}

impl InMemorySchemaService {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self {
            layers: Mutex::new(layers),
        }
    }

    pub fn add_layer(&self, layer: Layer) {
        self.layers.lock().unwrap().push(layer);
    }
}

impl ISchemaService for InMemorySchemaService {
    fn list_layers(&self, _project: ProjectId) -> CuratorResult<Vec<Layer>> {
        Ok(self.layers.lock().unwrap().clone())
    }

    fn get_layer(&self, id: LayerId) -> CuratorResult<Option<Layer>> {
        Ok(self
            .layers
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRecommenderService {
    recommenders: Mutex<Vec<Recommender>>,
}

impl InMemoryRecommenderService {
    pub fn new(recommenders: Vec<Recommender>) -> Self {
        Self {
            recommenders: Mutex::new(recommenders),
        }
    }

    /// Insert or replace by id.
    pub fn upsert(&self, recommender: Recommender) {
        let mut recommenders = self.recommenders.lock().unwrap();
        recommenders.retain(|r| r.id != recommender.id);
        recommenders.push(recommender);
    }

    pub fn remove(&self, id: RecommenderId) {
        self.recommenders.lock().unwrap().retain(|r| r.id != id);
    }
}

impl IRecommenderService for InMemoryRecommenderService {
    fn list_recommenders(&self, layer: &Layer) -> CuratorResult<Vec<Recommender>> {
        let mut found: Vec<Recommender> = self
            .recommenders
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.layer_id == layer.id)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    fn get_recommender(&self, id: RecommenderId) -> CuratorResult<Option<Recommender>> {
        Ok(self
            .recommenders
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryLearningRecordService {
    records: Mutex<Vec<LearningRecord>>,
}

impl InMemoryLearningRecordService {
    pub fn new(records: Vec<LearningRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Every stored record, in insertion order.
    pub fn all(&self) -> Vec<LearningRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl ILearningRecordService for InMemoryLearningRecordService {
    fn list_records(&self, user: &str, layer: LayerId) -> CuratorResult<Vec<LearningRecord>> {
        let mut found: Vec<LearningRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user == user && r.layer_id == layer)
            .cloned()
            .collect();
        // Most recent first; later inserts win ties.
        found.reverse();
        found.sort_by(|a, b| b.changed_at.cmp(&a.changed_at));
        Ok(found)
    }

    fn create_record(&self, record: LearningRecord) -> CuratorResult<()> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_user_state_overrides_shared_state() {
        let service = InMemoryDocumentService::new();
        let document = service.add_document("a.txt", AnnotationState::new("shared"));
        service.set_user_state("a.txt", "bob", AnnotationState::new("bob's"));

        assert_eq!(service.list_documents(PROJECT).unwrap(), vec![document.clone()]);
        assert_eq!(service.read_annotation_state(&document, "alice").unwrap().text, "shared");
        assert_eq!(service.read_annotation_state(&document, "bob").unwrap().text, "bob's");
        assert_eq!(service.read_count(), 2);
    }

    #[test]
    fn injected_failures_surface_as_document_errors() {
        let service = InMemoryDocumentService::new();
        let document = service.add_document("a.txt", AnnotationState::new("text"));
        service.fail_reads_of("a.txt");
        service.fail_clones_of("a.txt");

        assert!(matches!(
            service.read_annotation_state(&document, "alice"),
            Err(CuratorError::Document(DocumentError::ReadFailed { .. }))
        ));
        assert!(matches!(
            service.clone_state(&AnnotationState::new("text"), &document),
            Err(CuratorError::Document(DocumentError::CloneFailed { .. }))
        ));
        assert_eq!(service.read_count(), 0);
    }
}
