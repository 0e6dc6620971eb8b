//! # curator-observability
//!
//! Tracing subscriber setup driven by [`ObservabilityConfig`], span
//! definitions for the prediction, training, and selection tasks, and
//! lock-free task counters with a serializable snapshot.
//!
//! [`ObservabilityConfig`]: curator_core::config::ObservabilityConfig

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{MetricsSnapshot, TaskMetrics};
