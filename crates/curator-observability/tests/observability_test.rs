use std::sync::Arc;
use std::thread;

use curator_core::config::ObservabilityConfig;
use curator_observability::tracing_setup::{self, spans::names};
use curator_observability::{prediction_span, recommender_span, TaskMetrics};

#[test]
fn init_is_idempotent() {
    let config = ObservabilityConfig::default();
    tracing_setup::init(&config);
    tracing_setup::init(&config);
    tracing::info!("subscriber installed");
}

#[test]
fn span_macros_use_named_spans() {
    tracing_setup::init_with_filter("debug");
    let span = prediction_span!("alice", 1u64);
    let _guard = span.enter();
    let inner = recommender_span!("matcher-1", "doc-1.txt");
    let _inner = inner.enter();
    if let Some(meta) = span.metadata() {
        assert_eq!(meta.name(), names::PREDICTION);
    }
    if let Some(meta) = inner.metadata() {
        assert_eq!(meta.name(), names::RECOMMENDER);
    }
}

#[test]
fn metrics_survive_concurrent_updates() {
    let metrics = Arc::new(TaskMetrics::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let metrics = Arc::clone(&metrics);
            thread::spawn(move || {
                for _ in 0..100 {
                    metrics.record_invocation(false, 2);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let snap = metrics.snapshot();
    assert_eq!(snap.recommender_invocations, 800);
    assert_eq!(snap.suggestions_generated, 1600);
}

#[test]
fn snapshot_serializes() {
    let metrics = TaskMetrics::new();
    metrics.record_evaluation(true);
    let json = serde_json::to_value(metrics.snapshot()).unwrap();
    assert_eq!(json["evaluations"], 1);
    assert_eq!(json["activations"], 1);
}
