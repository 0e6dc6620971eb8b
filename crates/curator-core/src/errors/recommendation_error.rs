/// Failures raised by recommendation engines during train/predict/evaluate.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("key [{key}] not found in context")]
    MissingModel { key: String },

    #[error("model has unexpected type for key [{key}]")]
    ModelTypeMismatch { key: String },

    #[error("training failed: {reason}")]
    TrainingFailed { reason: String },

    #[error("prediction failed: {reason}")]
    PredictionFailed { reason: String },

    #[error("evaluation failed: {reason}")]
    EvaluationFailed { reason: String },

    #[error("invalid recommender traits: {reason}")]
    InvalidTraits { reason: String },

    #[error("malformed gazetteer line {line}: {content}")]
    MalformedGazetteer { line: usize, content: String },
}
