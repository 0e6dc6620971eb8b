use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LayerId, Offset};

/// What the user did with a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAction {
    Accepted,
    Rejected,
    Skipped,
    Corrected,
}

/// A persisted human decision. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningRecord {
    pub user: String,
    pub layer_id: LayerId,
    pub document_name: String,
    pub feature: String,
    pub offset: Offset,
    pub label: String,
    pub action: UserAction,
    pub changed_at: DateTime<Utc>,
}

impl LearningRecord {
    /// True when this record was made on the same document, position, and label.
    pub fn matches(&self, document_name: &str, offset: Offset, label: &str) -> bool {
        self.document_name == document_name && self.offset == offset && self.label == label
    }
}
