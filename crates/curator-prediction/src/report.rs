//! Per-invocation outcomes of a task, aggregated into a [`TaskReport`].

use chrono::{DateTime, Utc};
use curator_core::models::{LayerId, ProjectId, RecommenderId};
use serde::{Deserialize, Serialize};

/// Why a recommender was not invoked. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The recommender was deleted since it was activated.
    NoLongerAvailable,
    Disabled,
    ContextNotReady,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecommenderOutcome {
    Predicted { suggestions: usize },
    Trained,
    Evaluated { score: f64, activated: bool },
    /// Activated without evaluation.
    AlwaysSelected,
    Skipped { reason: SkipReason },
    Failed { reason: String },
}

/// One recommender step of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRecord {
    /// `None` for steps that span all documents.
    pub document: Option<String>,
    pub layer_id: LayerId,
    pub recommender_id: RecommenderId,
    pub recommender_name: String,
    #[serde(flatten)]
    pub outcome: RecommenderOutcome,
}

/// A document that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub document: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    pub task: String,
    pub user: String,
    pub project: ProjectId,
    pub trigger: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub invocations: Vec<InvocationRecord>,
    pub failed_documents: Vec<DocumentFailure>,
    pub cancelled: bool,
    /// Whether the task's result replaced the previous one.
    pub published: bool,
}

impl TaskReport {
    pub fn new(task: &str, user: &str, project: ProjectId, trigger: &str) -> Self {
        Self {
            task: task.to_string(),
            user: user.to_string(),
            project,
            trigger: trigger.to_string(),
            started_at: Utc::now(),
            duration_ms: 0,
            invocations: Vec::new(),
            failed_documents: Vec::new(),
            cancelled: false,
            published: false,
        }
    }

    pub fn record(&mut self, record: InvocationRecord) {
        self.invocations.push(record);
    }

    pub fn document_failed(&mut self, document: &str, reason: impl Into<String>) {
        self.failed_documents.push(DocumentFailure {
            document: document.to_string(),
            reason: reason.into(),
        });
    }

    pub fn failures(&self) -> impl Iterator<Item = &InvocationRecord> {
        self.invocations
            .iter()
            .filter(|r| matches!(r.outcome, RecommenderOutcome::Failed { .. }))
    }

    pub fn skips(&self) -> impl Iterator<Item = &InvocationRecord> {
        self.invocations
            .iter()
            .filter(|r| matches!(r.outcome, RecommenderOutcome::Skipped { .. }))
    }

    /// Steps that ran to completion.
    pub fn successes(&self) -> impl Iterator<Item = &InvocationRecord> {
        self.invocations.iter().filter(|r| {
            !matches!(
                r.outcome,
                RecommenderOutcome::Failed { .. } | RecommenderOutcome::Skipped { .. }
            )
        })
    }

    /// True when work was attempted and nothing succeeded.
    pub fn all_failed(&self) -> bool {
        let attempted = self.failures().count() + self.failed_documents.len();
        attempted > 0 && self.successes().next().is_none()
    }

    pub fn total_suggestions(&self) -> usize {
        self.invocations
            .iter()
            .map(|r| match r.outcome {
                RecommenderOutcome::Predicted { suggestions } => suggestions,
                _ => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(outcome: RecommenderOutcome) -> InvocationRecord {
        InvocationRecord {
            document: Some("d.txt".into()),
            layer_id: 1,
            recommender_id: 1,
            recommender_name: "rec".into(),
            outcome,
        }
    }

    #[test]
    fn all_failed_needs_attempts() {
        let mut report = TaskReport::new("prediction", "alice", 1, "manual");
        assert!(!report.all_failed());
        report.record(invocation(RecommenderOutcome::Skipped {
            reason: SkipReason::Disabled,
        }));
        assert!(!report.all_failed());
        report.record(invocation(RecommenderOutcome::Failed {
            reason: "boom".into(),
        }));
        assert!(report.all_failed());
        report.record(invocation(RecommenderOutcome::Predicted { suggestions: 2 }));
        assert!(!report.all_failed());
        assert_eq!(report.total_suggestions(), 2);
    }

    #[test]
    fn serializes_outcome_inline() {
        let json = serde_json::to_value(invocation(RecommenderOutcome::Skipped {
            reason: SkipReason::ContextNotReady,
        }))
        .unwrap();
        assert_eq!(json["outcome"], "skipped");
        assert_eq!(json["reason"], "context_not_ready");
    }
}
