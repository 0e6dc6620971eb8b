/// Curator system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Score assigned to a suggestion when its engine emits none.
pub const NO_SCORE: f64 = 0.0;

/// Feature name under which predicted spans carry their label.
pub const PREDICTED_LABEL_FEATURE: &str = "label";

/// Feature name under which predicted spans carry their confidence.
pub const PREDICTED_SCORE_FEATURE: &str = "score";

/// Tool id of the built-in string-matching engine.
pub const STRING_MATCHING_TOOL: &str = "string-matching";
