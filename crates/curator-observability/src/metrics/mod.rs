//! Counters shared by every task of a service.
//!
//! [`TaskMetrics`] is updated concurrently from parallel runs and read as a
//! [`MetricsSnapshot`].

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Point-in-time copy of [`TaskMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub prediction_runs: u64,
    pub cancelled_runs: u64,
    pub documents_processed: u64,
    pub documents_failed: u64,
    pub recommender_invocations: u64,
    pub recommender_failures: u64,
    pub recommenders_skipped: u64,
    pub suggestions_generated: u64,
    pub trainings: u64,
    pub training_failures: u64,
    pub evaluations: u64,
    pub activations: u64,
}

impl MetricsSnapshot {
    /// Fraction of recommender invocations that failed.
    pub fn failure_rate(&self) -> f64 {
        if self.recommender_invocations == 0 {
            return 0.0;
        }
        self.recommender_failures as f64 / self.recommender_invocations as f64
    }
}

#[derive(Debug, Default)]
pub struct TaskMetrics {
    prediction_runs: AtomicU64,
    cancelled_runs: AtomicU64,
    documents_processed: AtomicU64,
    documents_failed: AtomicU64,
    recommender_invocations: AtomicU64,
    recommender_failures: AtomicU64,
    recommenders_skipped: AtomicU64,
    suggestions_generated: AtomicU64,
    trainings: AtomicU64,
    training_failures: AtomicU64,
    evaluations: AtomicU64,
    activations: AtomicU64,
}

fn bump(counter: &AtomicU64, by: u64) {
    counter.fetch_add(by, Ordering::Relaxed);
}

impl TaskMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished prediction run.
    pub fn record_run(&self, cancelled: bool) {
        bump(&self.prediction_runs, 1);
        if cancelled {
            bump(&self.cancelled_runs, 1);
        }
    }

    pub fn record_document(&self, failed: bool) {
        if failed {
            bump(&self.documents_failed, 1);
        } else {
            bump(&self.documents_processed, 1);
        }
    }

    /// Record one recommender invocation and the suggestions it produced.
    pub fn record_invocation(&self, failed: bool, suggestions: usize) {
        bump(&self.recommender_invocations, 1);
        if failed {
            bump(&self.recommender_failures, 1);
        }
        bump(&self.suggestions_generated, suggestions as u64);
    }

    pub fn record_skip(&self) {
        bump(&self.recommenders_skipped, 1);
    }

    pub fn record_training(&self, failed: bool) {
        bump(&self.trainings, 1);
        if failed {
            bump(&self.training_failures, 1);
        }
    }

    pub fn record_evaluation(&self, activated: bool) {
        bump(&self.evaluations, 1);
        if activated {
            bump(&self.activations, 1);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        MetricsSnapshot {
            prediction_runs: load(&self.prediction_runs),
            cancelled_runs: load(&self.cancelled_runs),
            documents_processed: load(&self.documents_processed),
            documents_failed: load(&self.documents_failed),
            recommender_invocations: load(&self.recommender_invocations),
            recommender_failures: load(&self.recommender_failures),
            recommenders_skipped: load(&self.recommenders_skipped),
            suggestions_generated: load(&self.suggestions_generated),
            trainings: load(&self.trainings),
            training_failures: load(&self.training_failures),
            evaluations: load(&self.evaluations),
            activations: load(&self.activations),
        }
    }

    /// Reset all counters (useful for testing or periodic rotation).
    pub fn reset(&self) {
        for counter in [
            &self.prediction_runs,
            &self.cancelled_runs,
            &self.documents_processed,
            &self.documents_failed,
            &self.recommender_invocations,
            &self.recommender_failures,
            &self.recommenders_skipped,
            &self.suggestions_generated,
            &self.trainings,
            &self.training_failures,
            &self.evaluations,
            &self.activations,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
