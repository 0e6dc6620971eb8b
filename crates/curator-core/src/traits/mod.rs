mod data_splitter;
mod document_service;
mod learning_record_service;
mod recommendation_engine;
mod recommender_service;
mod schema_service;

pub use data_splitter::{IDataSplitter, TargetSet};
pub use document_service::IDocumentService;
pub use learning_record_service::ILearningRecordService;
pub use recommendation_engine::{IRecommendationEngine, IRecommenderFactory};
pub use recommender_service::IRecommenderService;
pub use schema_service::ISchemaService;
