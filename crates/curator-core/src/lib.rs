//! # curator-core
//!
//! Foundation crate for the Curator suggestion system.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod cancellation;
pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod models;
pub mod overlap;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancellation::CancellationToken;
pub use config::CuratorConfig;
pub use context::RecommenderContext;
pub use errors::{CuratorError, CuratorResult};
pub use models::{
    Annotation, AnnotationState, Delta, Document, Feature, HideFlags, Layer, LearningRecord,
    Offset, PredictedSpan, Predictions, Project, Recommender, Suggestion, SuggestionGroup,
    UserAction,
};
pub use overlap::OverlapIterator;
