use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GroupKey, LayerId, ProjectId, Suggestion, SuggestionGroup};

/// Aggregated suggestions of one prediction run for one user and project.
///
/// Built privately by a run and published as a whole; readers only ever see
/// complete snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub project_id: ProjectId,
    pub user: String,
    pub generated_at: DateTime<Utc>,
    layers: BTreeMap<LayerId, BTreeMap<GroupKey, SuggestionGroup>>,
}

impl Predictions {
    pub fn new(project_id: ProjectId, user: impl Into<String>) -> Self {
        Self {
            project_id,
            user: user.into(),
            generated_at: Utc::now(),
            layers: BTreeMap::new(),
        }
    }

    /// Add suggestions for a layer, merging into existing groups at the same position.
    pub fn put_predictions(&mut self, layer_id: LayerId, suggestions: Vec<Suggestion>) {
        self.put_groups(layer_id, SuggestionGroup::group(suggestions));
    }

    /// Add already-grouped suggestions for a layer. Groups of another layer
    /// are not filed.
    pub fn put_groups(&mut self, layer_id: LayerId, groups: Vec<SuggestionGroup>) {
        let layer = self.layers.entry(layer_id).or_default();
        for group in groups {
            debug_assert_eq!(
                group.layer_id(),
                layer_id,
                "suggestion group filed under another layer"
            );
            if group.layer_id() != layer_id {
                continue;
            }
            match layer.get_mut(group.key()) {
                Some(existing) => {
                    // Same layer and key, so the merge always succeeds.
                    existing.merge(group);
                }
                None => {
                    layer.insert(group.key().clone(), group);
                }
            }
        }
    }

    /// Groups of a layer ordered by (document, feature, offset).
    pub fn groups(&self, layer_id: LayerId) -> impl Iterator<Item = &SuggestionGroup> {
        self.layers.get(&layer_id).into_iter().flat_map(|l| l.values())
    }

    pub fn groups_mut(&mut self, layer_id: LayerId) -> impl Iterator<Item = &mut SuggestionGroup> {
        self.layers
            .get_mut(&layer_id)
            .into_iter()
            .flat_map(|l| l.values_mut())
    }

    /// Groups of a layer that belong to one document.
    pub fn groups_for_document<'a>(
        &'a self,
        layer_id: LayerId,
        document_name: &'a str,
    ) -> impl Iterator<Item = &'a SuggestionGroup> {
        self.groups(layer_id)
            .filter(move |g| g.document_name() == document_name)
    }

    pub fn suggestion_count(&self) -> usize {
        self.layers
            .values()
            .flat_map(|l| l.values())
            .map(SuggestionGroup::len)
            .sum()
    }

    /// Suggestions of a layer in one document that are currently shown.
    pub fn visible_count(&self, layer_id: LayerId, document_name: &str) -> usize {
        self.groups_for_document(layer_id, document_name)
            .flat_map(SuggestionGroup::iter)
            .filter(|s| s.is_visible())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestion_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HideFlags, Offset};

    fn suggestion(recommender: u64, doc: &str, begin: usize, label: &str) -> Suggestion {
        Suggestion::new(
            0,
            recommender,
            "rec",
            1,
            "value",
            doc,
            Offset::new(begin, begin + 4),
            "text",
            Some(label.to_string()),
            0.5,
        )
    }

    #[test]
    fn groups_from_several_recommenders_merge() {
        let mut p = Predictions::new(1, "alice");
        p.put_predictions(1, vec![suggestion(1, "a.txt", 0, "PER")]);
        p.put_predictions(1, vec![suggestion(2, "a.txt", 0, "ORG")]);
        p.put_predictions(1, vec![suggestion(2, "b.txt", 0, "ORG")]);
        assert_eq!(p.groups(1).count(), 2);
        assert_eq!(p.suggestion_count(), 3);
        assert_eq!(p.groups_for_document(1, "a.txt").next().unwrap().len(), 2);
        assert_eq!(p.groups(99).count(), 0);
    }

    #[test]
    fn visible_count_is_per_layer_and_document() {
        let mut p = Predictions::new(1, "alice");
        p.put_predictions(1, vec![suggestion(1, "a.txt", 0, "PER")]);
        p.put_predictions(1, vec![suggestion(2, "a.txt", 0, "ORG")]);
        p.put_predictions(1, vec![suggestion(1, "a.txt", 10, "LOC")]);
        p.put_predictions(1, vec![suggestion(1, "b.txt", 0, "PER")]);
        assert_eq!(p.visible_count(1, "a.txt"), 3);

        for s in p.groups_mut(1).flat_map(|g| g.iter_mut()) {
            if s.label.as_deref() == Some("ORG") {
                s.hide(HideFlags::REJECTED);
            }
        }
        assert_eq!(p.visible_count(1, "a.txt"), 2);
        assert_eq!(p.visible_count(1, "b.txt"), 1);
        assert_eq!(p.visible_count(2, "a.txt"), 0);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "filed under another layer"))]
    fn groups_of_another_layer_are_not_filed() {
        let mut p = Predictions::new(1, "alice");
        p.put_predictions(1, vec![suggestion(1, "a.txt", 0, "PER")]);
        let mut foreign = suggestion(2, "a.txt", 0, "ORG");
        foreign.layer_id = 2;
        p.put_groups(1, SuggestionGroup::group(vec![foreign]));
        assert_eq!(p.suggestion_count(), 1);
        assert_eq!(p.groups(2).count(), 0);
    }
}
