//! # curator-prediction
//!
//! Runs recommenders over a project's documents and turns what they write
//! into grouped, visibility-filtered suggestions.
//!
//! - [`task::SelectionTask`]: evaluates recommenders and decides which are active
//! - [`task::TrainingTask`]: trains active recommenders into fresh contexts
//! - [`task::PredictionTask`]: document → layer → recommender loop with
//!   per-recommender failure isolation and an atomic publish
//! - [`extraction`]: predicted spans to [`Suggestion`](curator_core::Suggestion)s
//! - [`visibility`]: hides suggestions that overlap annotations or were rejected
//! - [`PredictionService`]: façade that owns the stores and runs users in parallel

pub mod extraction;
pub mod registry;
pub mod report;
pub mod service;
pub mod services;
pub mod store;
pub mod task;
pub mod visibility;

pub use extraction::extract_suggestions;
pub use registry::FactoryRegistry;
pub use report::{InvocationRecord, RecommenderOutcome, SkipReason, TaskReport};
pub use service::PredictionService;
pub use services::RecommendationServices;
pub use store::{ActiveRecommenders, ContextStore, PredictionStore, Stores};
pub use task::{PredictionOutcome, PredictionTask, SelectionTask, TrainingTask};
pub use visibility::calculate_visibility;
