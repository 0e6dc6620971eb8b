// Single source of truth for all default values.

// --- Prediction ---
pub const DEFAULT_MAX_PARALLEL_RUNS: usize = 0; // 0 = one worker per core
pub const DEFAULT_TRIGGER: &str = "manual";

// --- String matching ---
pub const DEFAULT_NORMALIZE_WHITESPACE: bool = true;
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 3;

// --- Evaluation ---
pub const DEFAULT_TEST_PERCENTAGE: f64 = 0.2;
pub const DEFAULT_MIN_LABELED_SAMPLES: usize = 2;

// --- Active learning ---
pub const DEFAULT_STRATEGY: &str = "uncertainty";
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.0;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
