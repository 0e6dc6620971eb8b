use std::sync::Arc;

use curator_core::traits::{
    IDocumentService, ILearningRecordService, IRecommenderService, ISchemaService,
};

use crate::registry::FactoryRegistry;

/// Collaborators a task talks to. Cheap to clone.
#[derive(Clone)]
pub struct RecommendationServices {
    pub documents: Arc<dyn IDocumentService>,
    pub schema: Arc<dyn ISchemaService>,
    pub recommenders: Arc<dyn IRecommenderService>,
    pub learning_records: Arc<dyn ILearningRecordService>,
    pub factories: Arc<FactoryRegistry>,
}

impl RecommendationServices {
    pub fn new(
        documents: Arc<dyn IDocumentService>,
        schema: Arc<dyn ISchemaService>,
        recommenders: Arc<dyn IRecommenderService>,
        learning_records: Arc<dyn ILearningRecordService>,
        factories: Arc<FactoryRegistry>,
    ) -> Self {
        Self {
            documents,
            schema,
            recommenders,
            learning_records,
            factories,
        }
    }
}
