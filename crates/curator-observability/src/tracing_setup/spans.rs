//! Span definitions per task: prediction, training, selection, and a single
//! recommender invocation.

/// Create a prediction run span.
#[macro_export]
macro_rules! prediction_span {
    ($user:expr, $project:expr) => {
        tracing::info_span!("curator.prediction", user = %$user, project = $project)
    };
}

/// Create a training run span.
#[macro_export]
macro_rules! training_span {
    ($user:expr, $project:expr) => {
        tracing::info_span!("curator.training", user = %$user, project = $project)
    };
}

/// Create a recommender selection span.
#[macro_export]
macro_rules! selection_span {
    ($user:expr, $project:expr) => {
        tracing::info_span!("curator.selection", user = %$user, project = $project)
    };
}

/// Create a span for one user's active learning session on a layer.
#[macro_export]
macro_rules! active_learning_span {
    ($user:expr, $layer:expr, $session:expr) => {
        tracing::info_span!(
            "curator.active_learning",
            user = %$user,
            layer = $layer,
            session = %$session
        )
    };
}

/// Create a span around one recommender invocation on one document.
#[macro_export]
macro_rules! recommender_span {
    ($recommender:expr, $document:expr) => {
        tracing::debug_span!(
            "curator.recommender",
            recommender = %$recommender,
            document = %$document
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PREDICTION: &str = "curator.prediction";
    pub const TRAINING: &str = "curator.training";
    pub const SELECTION: &str = "curator.selection";
    pub const RECOMMENDER: &str = "curator.recommender";
    pub const ACTIVE_LEARNING: &str = "curator.active_learning";
}
