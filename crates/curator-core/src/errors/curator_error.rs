use super::{ConfigError, DocumentError, RecommendationError};

/// Convenience alias used across the workspace.
pub type CuratorResult<T> = Result<T, CuratorError>;

/// Top-level error for every Curator operation.
#[derive(Debug, thiserror::Error)]
pub enum CuratorError {
    #[error("recommender not found: {id}")]
    RecommenderNotFound { id: u64 },

    #[error("layer not found: {id}")]
    LayerNotFound { id: u64 },

    #[error("document not found: {name}")]
    DocumentNotFound { name: String },

    #[error("no recommender factory registered for tool {tool}")]
    FactoryNotFound { tool: String },

    #[error("model not ready for recommender {recommender}")]
    ModelNotReady { recommender: String },

    #[error("context already holds a value for key {key}")]
    ContextKeyTaken { key: String },

    #[error("task cancelled")]
    Cancelled,

    #[error("no suggestion is awaiting feedback from {user}")]
    NoPendingSuggestion { user: String },

    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    #[error("recommendation error: {0}")]
    Recommendation(#[from] RecommendationError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
