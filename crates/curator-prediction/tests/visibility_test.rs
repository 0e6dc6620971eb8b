//! Properties of the visibility calculation.

use curator_core::models::{
    Annotation, AnnotationState, HideFlags, Offset, Suggestion, SuggestionGroup, UserAction,
};
use curator_prediction::calculate_visibility;
use proptest::prelude::*;
use test_fixtures::{named_entity_layer, record, NAMED_ENTITY, VALUE};

const LABELS: [&str; 3] = ["LOC", "ORG", "PER"];

fn offset() -> impl Strategy<Value = Offset> {
    (0usize..40, 1usize..6).prop_map(|(begin, len)| Offset::new(begin, begin + len))
}

fn label() -> impl Strategy<Value = Option<String>> {
    prop::option::weighted(0.9, prop::sample::select(LABELS.to_vec()).prop_map(str::to_string))
}

fn state_with(annotations: &[(Offset, Option<String>)]) -> AnnotationState {
    let mut state = AnnotationState::new("x".repeat(50));
    for (offset, label) in annotations {
        let mut annotation = Annotation::new(NAMED_ENTITY, *offset);
        if let Some(label) = label {
            annotation = annotation.with_feature(VALUE, label.clone());
        }
        state.annotations.push(annotation);
    }
    state
}

fn groups_of(suggestions: &[(Offset, Option<String>)]) -> Vec<SuggestionGroup> {
    SuggestionGroup::group(
        suggestions
            .iter()
            .enumerate()
            .map(|(i, (offset, label))| {
                Suggestion::new(i, 1, "rec", 1, VALUE, "d.txt", *offset, "x", label.clone(), 0.5)
            })
            .collect(),
    )
}

fn flags(groups: &[SuggestionGroup]) -> Vec<HideFlags> {
    groups
        .iter()
        .flat_map(|group| group.iter())
        .map(Suggestion::flags)
        .collect()
}

proptest! {
    #[test]
    fn visibility_is_idempotent(
        annotations in prop::collection::vec((offset(), label()), 0..8),
        suggestions in prop::collection::vec((offset(), label()), 0..12),
        rejected in prop::collection::vec((offset(), prop::sample::select(LABELS.to_vec())), 0..4),
        stacking in any::<bool>(),
    ) {
        let state = state_with(&annotations);
        let layer = named_entity_layer(1, stacking);
        let records: Vec<_> = rejected
            .iter()
            .map(|(o, l)| record("alice", 1, "d.txt", *o, l, UserAction::Rejected, 0))
            .collect();
        let window = state.full_window();

        let mut groups = groups_of(&suggestions);
        calculate_visibility(&state, &records, &layer, groups.iter_mut(), window);
        let first = flags(&groups);
        calculate_visibility(&state, &records, &layer, groups.iter_mut(), window);
        prop_assert_eq!(&first, &flags(&groups));

        // A fresh set of groups reaches the same flags.
        let mut fresh = groups_of(&suggestions);
        calculate_visibility(&state, &records, &layer, fresh.iter_mut(), window);
        prop_assert_eq!(&first, &flags(&fresh));
    }

    #[test]
    fn non_stacking_hides_every_overlapping_group(
        annotations in prop::collection::vec((offset(), label()), 1..8),
        suggestions in prop::collection::vec((offset(), label()), 1..12),
    ) {
        let state = state_with(&annotations);
        let layer = named_entity_layer(1, false);
        let mut groups = groups_of(&suggestions);
        let window = state.full_window();
        calculate_visibility(&state, &[], &layer, groups.iter_mut(), window);

        let labeled: Vec<Offset> = annotations
            .iter()
            .filter(|(_, l)| l.is_some())
            .map(|(o, _)| *o)
            .collect();
        for group in &groups {
            if labeled.iter().any(|a| a.overlaps(&group.offset())) {
                prop_assert!(group.iter().all(|s| s.flags().contains(HideFlags::OVERLAP)));
            } else {
                prop_assert!(group.iter().all(|s| !s.flags().contains(HideFlags::OVERLAP)));
            }
        }
    }
}

#[test]
fn annotation_at_same_position_hides_both_labels_without_stacking() {
    let state = state_with(&[(Offset::new(10, 15), Some("LOC".into()))]);
    let suggestions = [
        (Offset::new(10, 15), Some("LOC".to_string())),
        (Offset::new(10, 15), Some("ORG".to_string())),
    ];

    let mut groups = groups_of(&suggestions);
    let layer = named_entity_layer(1, false);
    calculate_visibility(&state, &[], &layer, groups.iter_mut(), state.full_window());
    assert_eq!(flags(&groups), vec![HideFlags::OVERLAP, HideFlags::OVERLAP]);

    let mut groups = groups_of(&suggestions);
    let layer = named_entity_layer(1, true);
    calculate_visibility(&state, &[], &layer, groups.iter_mut(), state.full_window());
    assert_eq!(flags(&groups), vec![HideFlags::OVERLAP, HideFlags::NONE]);
}
