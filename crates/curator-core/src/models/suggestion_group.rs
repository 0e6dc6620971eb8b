use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{LayerId, Offset, RecommenderId, Suggestion};

/// Identity of a group inside one layer: document, feature, position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub document_name: String,
    pub feature: String,
    pub offset: Offset,
}

/// All suggestions sharing one (layer, feature, offset) in one document.
///
/// Every member has identical `begin`/`end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionGroup {
    layer_id: LayerId,
    key: GroupKey,
    suggestions: Vec<Suggestion>,
}

/// Score gap between the best and second-best visible suggestion of one
/// recommender in a group. Small deltas mean the recommender is unsure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub first: Suggestion,
    pub second: Option<Suggestion>,
    pub delta: f64,
}

impl Delta {
    pub fn new(first: Suggestion, second: Option<Suggestion>) -> Self {
        let delta = match &second {
            Some(s) => first.score - s.score,
            None => first.score,
        };
        Self {
            first,
            second,
            delta,
        }
    }
}

impl SuggestionGroup {
    /// Start a group from its first member.
    pub fn new(first: Suggestion) -> Self {
        Self {
            layer_id: first.layer_id,
            key: Self::key_of(&first),
            suggestions: vec![first],
        }
    }

    pub fn key_of(suggestion: &Suggestion) -> GroupKey {
        GroupKey {
            document_name: suggestion.document_name.clone(),
            feature: suggestion.feature.clone(),
            offset: suggestion.offset,
        }
    }

    /// Partition suggestions into groups ordered by (document, feature, offset).
    pub fn group(suggestions: Vec<Suggestion>) -> Vec<SuggestionGroup> {
        let mut groups: BTreeMap<(LayerId, GroupKey), SuggestionGroup> = BTreeMap::new();
        for suggestion in suggestions {
            let key = (suggestion.layer_id, Self::key_of(&suggestion));
            match groups.get_mut(&key) {
                Some(group) => group.suggestions.push(suggestion),
                None => {
                    groups.insert(key, SuggestionGroup::new(suggestion));
                }
            }
        }
        groups.into_values().collect()
    }

    pub fn layer_id(&self) -> LayerId {
        self.layer_id
    }

    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    pub fn offset(&self) -> Offset {
        self.key.offset
    }

    pub fn feature(&self) -> &str {
        &self.key.feature
    }

    pub fn document_name(&self) -> &str {
        &self.key.document_name
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Suggestion> {
        self.suggestions.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Suggestion> {
        self.suggestions.iter_mut()
    }

    pub fn is_visible(&self) -> bool {
        self.suggestions.iter().any(Suggestion::is_visible)
    }

    /// Add members of another group at the same position. Returns false and
    /// leaves both untouched when the keys differ.
    pub fn merge(&mut self, other: SuggestionGroup) -> bool {
        if other.layer_id != self.layer_id || other.key != self.key {
            return false;
        }
        self.suggestions.extend(other.suggestions);
        true
    }

    /// One delta per recommender, built from its visible suggestions only.
    pub fn top_deltas(&self) -> Vec<Delta> {
        let mut by_recommender: BTreeMap<RecommenderId, Vec<&Suggestion>> = BTreeMap::new();
        for s in self.suggestions.iter().filter(|s| s.is_visible()) {
            by_recommender.entry(s.recommender_id).or_default().push(s);
        }
        by_recommender
            .into_values()
            .map(|mut members| {
                members.sort_by(|a, b| b.score.total_cmp(&a.score));
                let first = members[0].clone();
                let second = members.get(1).map(|s| (*s).clone());
                Delta::new(first, second)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a SuggestionGroup {
    type Item = &'a Suggestion;
    type IntoIter = std::slice::Iter<'a, Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.suggestions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HideFlags;

    fn suggestion(id: usize, recommender: u64, offset: (usize, usize), label: &str, score: f64) -> Suggestion {
        Suggestion::new(
            id,
            recommender,
            format!("rec-{recommender}"),
            7,
            "value",
            "doc.txt",
            offset.into(),
            "x",
            Some(label.to_string()),
            score,
        )
    }

    #[test]
    fn groups_share_offsets() {
        let groups = SuggestionGroup::group(vec![
            suggestion(0, 1, (10, 15), "LOC", 0.75),
            suggestion(1, 1, (0, 4), "PER", 1.0),
            suggestion(2, 1, (10, 15), "ORG", 0.25),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].offset(), Offset::new(0, 4));
        assert_eq!(groups[1].len(), 2);
        for g in &groups {
            assert!(g.iter().all(|s| s.offset == g.offset()));
        }
    }

    #[test]
    fn delta_is_gap_between_two_best() {
        let groups = SuggestionGroup::group(vec![
            suggestion(0, 1, (10, 15), "LOC", 0.75),
            suggestion(1, 1, (10, 15), "ORG", 0.25),
            suggestion(2, 2, (10, 15), "LOC", 0.9),
        ]);
        let deltas = groups[0].top_deltas();
        assert_eq!(deltas.len(), 2);
        assert!((deltas[0].delta - 0.5).abs() < 1e-9);
        assert_eq!(deltas[0].first.label.as_deref(), Some("LOC"));
        assert!((deltas[1].delta - 0.9).abs() < 1e-9);
        assert!(deltas[1].second.is_none());
    }

    #[test]
    fn hidden_suggestions_do_not_count_for_deltas() {
        let mut groups = SuggestionGroup::group(vec![
            suggestion(0, 1, (10, 15), "LOC", 0.75),
            suggestion(1, 1, (10, 15), "ORG", 0.25),
        ]);
        groups[0].iter_mut().next().unwrap().hide(HideFlags::REJECTED);
        let deltas = groups[0].top_deltas();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].first.label.as_deref(), Some("ORG"));
    }

    #[test]
    fn merge_rejects_foreign_groups() {
        let mut a = SuggestionGroup::new(suggestion(0, 1, (0, 4), "PER", 1.0));
        let b = SuggestionGroup::new(suggestion(0, 2, (0, 5), "PER", 1.0));
        assert!(!a.merge(b));
        let c = SuggestionGroup::new(suggestion(0, 2, (0, 4), "PER", 0.5));
        assert!(a.merge(c));
        assert_eq!(a.len(), 2);
    }
}
