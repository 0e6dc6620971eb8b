mod config_error;
mod curator_error;
mod document_error;
mod recommendation_error;

pub use config_error::ConfigError;
pub use curator_error::{CuratorError, CuratorResult};
pub use document_error::DocumentError;
pub use recommendation_error::RecommendationError;
