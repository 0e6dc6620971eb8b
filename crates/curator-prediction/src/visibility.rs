//! Decide which suggestions a user gets to see.
//!
//! Works per feature of a layer. A suggestion is hidden when it overlaps an
//! existing annotation it would duplicate or conflict with, when it has no
//! label, or when the user already rejected or skipped it.

use std::collections::BTreeMap;

use curator_core::models::{
    AnnotationState, HideFlags, Layer, LearningRecord, Offset, SuggestionGroup, UserAction,
};
use curator_core::OverlapIterator;
use tracing::trace;

/// Recompute the hide flags of every group of `layer` lying inside `window`.
///
/// `original` must hold only human annotations. Flags of groups inside the
/// window are cleared first, so repeated calls with the same inputs give the
/// same result. Groups of other layers or outside the window are left alone.
pub fn calculate_visibility<'g>(
    original: &AnnotationState,
    records: &[LearningRecord],
    layer: &Layer,
    groups: impl IntoIterator<Item = &'g mut SuggestionGroup>,
    window: Offset,
) {
    let mut in_window: Vec<&mut SuggestionGroup> = groups
        .into_iter()
        .filter(|g| g.layer_id() == layer.id && window.covers(&g.offset()))
        .collect();

    for feature in &layer.features {
        // One group per position, ordered by (begin, end).
        let mut suggestions: BTreeMap<Offset, usize> = BTreeMap::new();
        for (idx, group) in in_window.iter_mut().enumerate() {
            if group.feature() != feature.name {
                continue;
            }
            group.iter_mut().for_each(|s| s.reset_visibility());
            suggestions.insert(group.offset(), idx);
        }

        // Several annotations may share a position.
        let mut annotations: BTreeMap<Offset, Vec<&str>> = BTreeMap::new();
        for annotation in original.annotations_of(&layer.name) {
            if !window.covers(&annotation.offset) {
                continue;
            }
            if let Some(label) = annotation.feature(&feature.name) {
                annotations.entry(annotation.offset).or_default().push(label);
            }
        }

        if suggestions.is_empty() || annotations.is_empty() {
            continue;
        }

        let group_offsets: Vec<Offset> = suggestions.keys().copied().collect();
        let annotation_offsets: Vec<Offset> = annotations.keys().copied().collect();

        let mut it = OverlapIterator::new(&group_offsets, &annotation_offsets);
        while it.has_next() {
            if it.overlaps() {
                let group = &mut in_window[suggestions[&it.a()]];
                for label in &annotations[&it.b()] {
                    for suggestion in group.iter_mut() {
                        if !layer.allow_stacking || suggestion.label.as_deref() == Some(*label) {
                            suggestion.hide(HideFlags::OVERLAP);
                        }
                    }
                }
                // The group is settled; later annotations cannot unhide it.
                it.ignore_a();
            }
            it.step();
        }

        for &idx in suggestions.values() {
            for suggestion in in_window[idx].iter_mut().filter(|s| s.is_visible()) {
                let Some(label) = suggestion.label.as_deref() else {
                    suggestion.hide(HideFlags::NO_LABEL);
                    continue;
                };
                // The first record at this position and label decides.
                let decision = records
                    .iter()
                    .find(|r| r.matches(&suggestion.document_name, suggestion.offset, label))
                    .map(|r| r.action);
                match decision {
                    Some(UserAction::Rejected) => suggestion.hide(HideFlags::REJECTED),
                    Some(UserAction::Skipped) => suggestion.hide(HideFlags::SKIPPED),
                    // Accepted and corrected suggestions became annotations
                    // and were handled by the overlap pass.
                    _ => {}
                }
            }
        }

        trace!(
            layer = %layer.name,
            feature = %feature.name,
            groups = suggestions.len(),
            annotations = annotations.len(),
            "visibility pass complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_core::models::{Annotation, Suggestion};
    use test_fixtures::{named_entity_layer, record, NAMED_ENTITY, VALUE};

    fn text() -> AnnotationState {
        AnnotationState::new("The city Paris is nice and Lyon is too.")
    }

    fn suggestion(begin: usize, end: usize, label: Option<&str>) -> Suggestion {
        Suggestion::new(
            0,
            1,
            "rec",
            1,
            VALUE,
            "d.txt",
            Offset::new(begin, end),
            "x",
            label.map(str::to_string),
            0.5,
        )
    }

    fn annotate(state: &mut AnnotationState, begin: usize, end: usize, label: &str) {
        state
            .annotations
            .push(Annotation::new(NAMED_ENTITY, Offset::new(begin, end)).with_feature(VALUE, label));
    }

    fn visible(groups: &[SuggestionGroup]) -> Vec<Option<String>> {
        groups
            .iter()
            .flat_map(SuggestionGroup::iter)
            .filter(|s| s.is_visible())
            .map(|s| s.label.clone())
            .collect()
    }

    #[test]
    fn non_stacking_layer_hides_any_overlap() {
        let mut state = text();
        annotate(&mut state, 9, 14, "LOC");
        let layer = named_entity_layer(1, false);
        let mut groups = SuggestionGroup::group(vec![
            suggestion(9, 14, Some("LOC")),
            suggestion(9, 14, Some("ORG")),
        ]);
        let window = state.full_window();
        calculate_visibility(&state, &[], &layer, groups.iter_mut(), window);
        assert!(visible(&groups).is_empty());
        assert!(groups[0]
            .iter()
            .all(|s| s.flags().contains(HideFlags::OVERLAP)));
    }

    #[test]
    fn stacking_layer_keeps_different_labels() {
        let mut state = text();
        annotate(&mut state, 9, 14, "LOC");
        let layer = named_entity_layer(1, true);
        let mut groups = SuggestionGroup::group(vec![
            suggestion(9, 14, Some("LOC")),
            suggestion(9, 14, Some("ORG")),
        ]);
        let window = state.full_window();
        calculate_visibility(&state, &[], &layer, groups.iter_mut(), window);
        assert_eq!(visible(&groups), vec![Some("ORG".to_string())]);
    }

    #[test]
    fn touching_offsets_do_not_overlap() {
        let mut state = text();
        annotate(&mut state, 9, 14, "LOC");
        let layer = named_entity_layer(1, false);
        let mut groups = SuggestionGroup::group(vec![suggestion(14, 17, Some("LOC"))]);
        let window = state.full_window();
        calculate_visibility(&state, &[], &layer, groups.iter_mut(), window);
        assert_eq!(visible(&groups).len(), 1);
    }

    #[test]
    fn rejected_skipped_and_unlabeled_are_hidden() {
        let mut state = text();
        annotate(&mut state, 0, 3, "X");
        let layer = named_entity_layer(1, false);
        let records = vec![
            record("alice", 1, "d.txt", Offset::new(27, 31), "LOC", UserAction::Rejected, 0),
            record("alice", 1, "d.txt", Offset::new(9, 14), "LOC", UserAction::Skipped, 0),
            record("alice", 1, "d.txt", Offset::new(35, 38), "LOC", UserAction::Accepted, 0),
        ];
        let mut groups = SuggestionGroup::group(vec![
            suggestion(27, 31, Some("LOC")),
            suggestion(9, 14, Some("LOC")),
            suggestion(35, 38, Some("LOC")),
            suggestion(18, 22, None),
        ]);
        let window = state.full_window();
        calculate_visibility(&state, &records, &layer, groups.iter_mut(), window);

        let flags: Vec<(usize, HideFlags)> = groups
            .iter()
            .flat_map(SuggestionGroup::iter)
            .map(|s| (s.begin(), s.flags()))
            .collect();
        assert!(flags.contains(&(9, HideFlags::SKIPPED)));
        assert!(flags.contains(&(18, HideFlags::NO_LABEL)));
        assert!(flags.contains(&(27, HideFlags::REJECTED)));
        assert!(flags.contains(&(35, HideFlags::NONE)));
    }

    #[test]
    fn records_of_other_documents_do_not_apply() {
        let mut state = text();
        annotate(&mut state, 0, 3, "X");
        let layer = named_entity_layer(1, false);
        let records = vec![record(
            "alice",
            1,
            "other.txt",
            Offset::new(9, 14),
            "LOC",
            UserAction::Rejected,
            0,
        )];
        let mut groups = SuggestionGroup::group(vec![suggestion(9, 14, Some("LOC"))]);
        let window = state.full_window();
        calculate_visibility(&state, &records, &layer, groups.iter_mut(), window);
        assert_eq!(visible(&groups).len(), 1);
    }

    #[test]
    fn no_annotations_means_nothing_to_hide() {
        let state = text();
        let layer = named_entity_layer(1, false);
        let records = vec![record(
            "alice",
            1,
            "d.txt",
            Offset::new(9, 14),
            "LOC",
            UserAction::Rejected,
            0,
        )];
        let mut groups = SuggestionGroup::group(vec![suggestion(9, 14, Some("LOC"))]);
        let window = state.full_window();
        calculate_visibility(&state, &records, &layer, groups.iter_mut(), window);
        assert_eq!(visible(&groups).len(), 1);
    }

    #[test]
    fn groups_outside_window_keep_their_flags() {
        let mut state = text();
        annotate(&mut state, 9, 14, "LOC");
        let layer = named_entity_layer(1, false);
        let mut groups = SuggestionGroup::group(vec![suggestion(9, 14, Some("LOC"))]);
        calculate_visibility(&state, &[], &layer, groups.iter_mut(), state.full_window());
        assert!(!groups[0].is_visible());

        // A window that excludes the group leaves it hidden.
        state.annotations.clear();
        calculate_visibility(&state, &[], &layer, groups.iter_mut(), Offset::new(20, 30));
        assert!(!groups[0].is_visible());

        // Recomputing over it with the annotation gone shows it again.
        let window = state.full_window();
        calculate_visibility(&state, &[], &layer, groups.iter_mut(), window);
        assert!(groups[0].is_visible());
    }
}
