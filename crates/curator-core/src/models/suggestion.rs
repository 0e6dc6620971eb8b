use serde::{Deserialize, Serialize};
use std::fmt;

use super::{LayerId, Offset, RecommenderId};

/// Set of reasons why a suggestion is hidden. Empty means visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HideFlags(u8);

impl HideFlags {
    pub const NONE: HideFlags = HideFlags(0);
    /// Overlaps an existing annotation.
    pub const OVERLAP: HideFlags = HideFlags(1);
    /// A learning record rejected this label at this position.
    pub const REJECTED: HideFlags = HideFlags(1 << 1);
    /// A learning record skipped this label at this position.
    pub const SKIPPED: HideFlags = HideFlags(1 << 2);
    /// The engine emitted no label.
    pub const NO_LABEL: HideFlags = HideFlags(1 << 3);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: HideFlags) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: HideFlags) {
        self.0 |= other.0;
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HideFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "visible");
        }
        let names = [
            (Self::OVERLAP, "overlap"),
            (Self::REJECTED, "rejected"),
            (Self::SKIPPED, "skipped"),
            (Self::NO_LABEL, "no-label"),
        ];
        let parts: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", parts.join("|"))
    }
}

/// A candidate annotation proposed by a recommender.
///
/// Only the visibility calculation touches `flags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Sequential id, unique within one extraction batch.
    pub id: usize,
    pub recommender_id: RecommenderId,
    pub recommender_name: String,
    pub layer_id: LayerId,
    pub feature: String,
    pub document_name: String,
    pub offset: Offset,
    pub covered_text: String,
    pub label: Option<String>,
    pub ui_label: Option<String>,
    pub score: f64,
    #[serde(default)]
    flags: HideFlags,
}

impl Suggestion {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        recommender_id: RecommenderId,
        recommender_name: impl Into<String>,
        layer_id: LayerId,
        feature: impl Into<String>,
        document_name: impl Into<String>,
        offset: Offset,
        covered_text: impl Into<String>,
        label: Option<String>,
        score: f64,
    ) -> Self {
        Self {
            id,
            recommender_id,
            recommender_name: recommender_name.into(),
            layer_id,
            feature: feature.into(),
            document_name: document_name.into(),
            offset,
            covered_text: covered_text.into(),
            ui_label: label.clone(),
            label,
            score,
            flags: HideFlags::NONE,
        }
    }

    pub fn begin(&self) -> usize {
        self.offset.begin
    }

    pub fn end(&self) -> usize {
        self.offset.end
    }

    pub fn flags(&self) -> HideFlags {
        self.flags
    }

    pub fn is_visible(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn hide(&mut self, reason: HideFlags) {
        self.flags.insert(reason);
    }

    /// Clear all hide reasons before a fresh visibility pass.
    pub fn reset_visibility(&mut self) {
        self.flags = HideFlags::NONE;
    }
}
