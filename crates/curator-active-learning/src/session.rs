//! One user's review loop on one layer.

use std::sync::Arc;

use chrono::Utc;
use curator_core::config::ActiveLearningConfig;
use curator_core::errors::{CuratorError, CuratorResult};
use curator_core::models::{Delta, Layer, LearningRecord, SuggestionGroup, UserAction};
use curator_core::traits::ILearningRecordService;
use curator_observability::active_learning_span;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::strategy::{build_strategy, IActiveLearningStrategy};

/// What the user did with the suggestion they were shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Accept,
    Reject,
    Skip,
    /// The position is right but the label is not; carries the right label.
    Correct(String),
}

impl Feedback {
    fn action(&self) -> UserAction {
        match self {
            Feedback::Accept => UserAction::Accepted,
            Feedback::Reject => UserAction::Rejected,
            Feedback::Skip => UserAction::Skipped,
            Feedback::Correct(_) => UserAction::Corrected,
        }
    }
}

/// Asks a strategy what to show next and writes the user's answer back as a
/// [`LearningRecord`]. At most one suggestion is pending at a time.
pub struct ActiveLearningSession {
    id: String,
    user: String,
    layer: Layer,
    strategy: Box<dyn IActiveLearningStrategy>,
    records: Arc<dyn ILearningRecordService>,
    pending: Option<Delta>,
}

impl ActiveLearningSession {
    pub fn new(
        user: impl Into<String>,
        layer: Layer,
        strategy: Box<dyn IActiveLearningStrategy>,
        records: Arc<dyn ILearningRecordService>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user: user.into(),
            layer,
            strategy,
            records,
            pending: None,
        }
    }

    /// Session with the strategy named in `config`.
    pub fn from_config(
        user: impl Into<String>,
        layer: Layer,
        config: &ActiveLearningConfig,
        records: Arc<dyn ILearningRecordService>,
    ) -> CuratorResult<Self> {
        Ok(Self::new(user, layer, build_strategy(config)?, records))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn strategy(&self) -> &str {
        self.strategy.name()
    }

    /// The suggestion awaiting feedback, if any.
    pub fn pending(&self) -> Option<&Delta> {
        self.pending.as_ref()
    }

    /// Pick the next suggestion from `groups` given the user's current record
    /// history. Replaces any suggestion still pending.
    pub fn next_suggestion(&mut self, groups: &[SuggestionGroup]) -> CuratorResult<Option<&Delta>> {
        let span = active_learning_span!(self.user, self.layer.id, self.id);
        let _guard = span.enter();

        let records = self.records.list_records(&self.user, self.layer.id)?;
        self.pending = self
            .strategy
            .generate_next_suggestion(&records, &self.layer, groups);

        match &self.pending {
            Some(delta) => debug!(
                strategy = self.strategy.name(),
                document = %delta.first.document_name,
                begin = delta.first.begin(),
                end = delta.first.end(),
                label = ?delta.first.label,
                delta = delta.delta,
                "next suggestion"
            ),
            None => info!(
                strategy = self.strategy.name(),
                records = records.len(),
                "no suggestion left to review"
            ),
        }
        Ok(self.pending.as_ref())
    }

    /// Record the user's answer to the pending suggestion. When the record
    /// cannot be written the suggestion stays pending.
    pub fn respond(&mut self, feedback: Feedback) -> CuratorResult<LearningRecord> {
        let span = active_learning_span!(self.user, self.layer.id, self.id);
        let _guard = span.enter();

        let delta = self.pending.take().ok_or_else(|| CuratorError::NoPendingSuggestion {
            user: self.user.clone(),
        })?;
        let suggestion = &delta.first;
        let label = match &feedback {
            Feedback::Correct(label) => label.clone(),
            _ => suggestion.label.clone().unwrap_or_default(),
        };
        let record = LearningRecord {
            user: self.user.clone(),
            layer_id: suggestion.layer_id,
            document_name: suggestion.document_name.clone(),
            feature: suggestion.feature.clone(),
            offset: suggestion.offset,
            label,
            action: feedback.action(),
            changed_at: Utc::now(),
        };

        if let Err(e) = self.records.create_record(record.clone()) {
            warn!(
                document = %record.document_name,
                action = ?record.action,
                error = %e,
                "failed to write learning record"
            );
            self.pending = Some(delta);
            return Err(e);
        }
        info!(
            document = %record.document_name,
            begin = record.offset.begin,
            end = record.offset.end,
            label = %record.label,
            action = ?record.action,
            "learning record written"
        );
        Ok(record)
    }
}

impl std::fmt::Debug for ActiveLearningSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveLearningSession")
            .field("id", &self.id)
            .field("user", &self.user)
            .field("layer", &self.layer.id)
            .field("strategy", &self.strategy.name())
            .field("pending", &self.pending)
            .finish()
    }
}
