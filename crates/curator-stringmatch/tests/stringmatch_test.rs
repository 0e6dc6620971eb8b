//! End-to-end tests for the string-matching engine on fixture corpora.

use curator_core::config::StringMatchConfig;
use curator_core::errors::{CuratorError, RecommendationError};
use curator_core::traits::{IDataSplitter, IRecommendationEngine, TargetSet};
use curator_core::RecommenderContext;
use curator_stringmatch::gazetteer;
use curator_stringmatch::{
    Dictionary, PercentageSplitter, StringMatchingRecommender, StringMatchingTraits, KEY_MODEL,
};
use proptest::prelude::*;
use test_fixtures::{annotated, fixture_path, load_corpus, segment, string_matcher};

fn engine() -> StringMatchingRecommender {
    StringMatchingRecommender::new(
        &string_matcher(1, 1),
        &StringMatchingTraits::default(),
        &StringMatchConfig::default(),
    )
}

fn labels_at(state: &curator_core::AnnotationState, surface: &str) -> Vec<(String, f64)> {
    state
        .predictions
        .iter()
        .filter(|p| state.covered_text(p.offset).unwrap() == surface)
        .map(|p| (p.label.clone().unwrap(), p.score.unwrap()))
        .collect()
}

/// Routes every sample to one partition.
struct Everything(TargetSet);

impl IDataSplitter for Everything {
    fn target_set(&mut self, _sample_index: usize) -> TargetSet {
        self.0
    }
}

#[test]
fn dictionary_tracks_label_frequencies() {
    let states = load_corpus("cities").states();
    let dict = engine().train_dictionary(&states).unwrap();

    let best = dict.get("Paris").unwrap().best(2);
    assert_eq!(best[0].label, "LOC");
    assert_eq!(best[0].count, 3);
    assert!((best[0].rel_freq - 0.75).abs() < 1e-9);
    assert_eq!(best[1].label, "ORG");
    assert!((best[1].rel_freq - 0.25).abs() < 1e-9);
}

#[test]
fn train_stores_model_and_marks_ready() {
    let states = load_corpus("cities").states();
    let mut context = RecommenderContext::new();
    engine().train(&mut context, &states).unwrap();

    assert!(context.is_ready_for_prediction());
    let dict: &Dictionary = context.get(KEY_MODEL).unwrap();
    assert!(dict.get("Berlin").is_some());
}

#[test]
fn predict_suggests_known_strings_on_token_boundaries() {
    let corpus = load_corpus("cities");
    let states = corpus.states();
    let mut context = RecommenderContext::new();
    let engine = engine();
    engine.train(&mut context, &states[..2]).unwrap();

    let mut target = states[2].clone();
    engine.predict(&context, &mut target).unwrap();

    let paris = labels_at(&target, "Paris");
    assert_eq!(paris.len(), 2);
    assert_eq!(paris[0].0, "LOC");
    assert!((paris[0].1 - 0.75).abs() < 1e-9);
    assert_eq!(paris[1].0, "ORG");

    assert_eq!(labels_at(&target, "Louvre"), vec![("LOC".to_string(), 1.0)]);
    // "Parisians" starts with a known key but the match ends mid-token.
    let parisians = target.text.find("Parisians").unwrap();
    assert!(target.predictions.iter().all(|p| p.offset.begin != parisians));
    assert!(target
        .predictions
        .iter()
        .all(|p| p.layer == "NamedEntity" && p.feature == "value"));
}

#[test]
fn max_recommendations_caps_labels_per_span() {
    let states = load_corpus("cities").states();
    let mut recommender = string_matcher(1, 1);
    recommender.max_recommendations = 1;
    let engine = StringMatchingRecommender::new(
        &recommender,
        &StringMatchingTraits::default(),
        &StringMatchConfig::default(),
    );
    let mut context = RecommenderContext::new();
    engine.train(&mut context, &states).unwrap();

    let mut target = segment("Paris again.");
    engine.predict(&context, &mut target).unwrap();
    assert_eq!(labels_at(&target, "Paris"), vec![("LOC".to_string(), 0.75)]);
}

#[test]
fn blank_labels_are_not_learned() {
    let states = vec![annotated("[[Acme|]] and [[Acme|ORG]].")];
    let dict = engine().train_dictionary(&states).unwrap();
    assert_eq!(dict.get("Acme").unwrap().total(), 1);
}

#[test]
fn gazetteer_pretraining_feeds_predictions() {
    let source = std::fs::read_to_string(fixture_path("corpus/gazetteer.tsv")).unwrap();
    let entries = gazetteer::parse_str(&source).unwrap();
    assert_eq!(entries.len(), 3);

    let mut engine = engine();
    engine.pretrain(entries);
    let mut context = RecommenderContext::new();
    engine.train(&mut context, &[]).unwrap();

    let mut target = segment("We flew from London to New  York.");
    engine.predict(&context, &mut target).unwrap();
    assert_eq!(labels_at(&target, "London"), vec![("LOC".to_string(), 1.0)]);
    // Whitespace runs are collapsed by default.
    assert_eq!(labels_at(&target, "New  York"), vec![("LOC".to_string(), 1.0)]);
}

#[test]
fn exact_normalization_keeps_whitespace() {
    let mut engine = StringMatchingRecommender::new(
        &string_matcher(1, 1),
        &StringMatchingTraits {
            normalize_whitespace: Some(false),
        },
        &StringMatchConfig::default(),
    );
    engine.pretrain(vec![gazetteer::GazetteerEntry::new("New York", "LOC")]);
    let mut context = RecommenderContext::new();
    engine.train(&mut context, &[]).unwrap();

    let mut target = segment("New  York and New York.");
    engine.predict(&context, &mut target).unwrap();
    assert_eq!(target.predictions.len(), 1);
    assert_eq!(target.covered_text(target.predictions[0].offset).unwrap(), "New York");
}

/// Sends the first sample to training and everything else to testing.
struct FirstForTraining;

impl IDataSplitter for FirstForTraining {
    fn target_set(&mut self, sample_index: usize) -> TargetSet {
        if sample_index == 0 {
            TargetSet::Train
        } else {
            TargetSet::Test
        }
    }
}

#[test]
fn predict_before_training_fails() {
    let mut target = segment("Paris.");
    let err = engine()
        .predict(&RecommenderContext::new(), &mut target)
        .unwrap_err();
    assert!(matches!(
        err,
        CuratorError::ModelNotReady { ref recommender } if recommender == "matcher-1"
    ));
    assert!(target.predictions.is_empty());
}

#[test]
fn predict_on_ready_context_without_model_fails() {
    let mut context = RecommenderContext::new();
    context.mark_ready_for_prediction();
    let mut target = segment("Paris.");
    let err = engine().predict(&context, &mut target).unwrap_err();
    assert!(matches!(
        err,
        CuratorError::Recommendation(RecommendationError::MissingModel { .. })
    ));
    assert!(target.predictions.is_empty());
}

#[test]
fn evaluate_with_too_few_test_samples_scores_zero() {
    let states = vec![annotated("[[Paris|LOC]] is big. [[Rome|LOC]] is warm.")];
    let mut splitter = PercentageSplitter::new(0.5);
    // One labeled sample lands in each partition, below the minimum of two.
    let score = engine().evaluate(&states, &mut splitter).unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn evaluate_with_too_few_training_samples_scores_zero() {
    // Nine labeled test sentences but a single labeled training sentence.
    let states = load_corpus("evaluation").states();
    let score = engine().evaluate(&states, &mut FirstForTraining).unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn evaluate_without_test_partition_scores_zero() {
    let states = load_corpus("evaluation").states();
    let score = engine()
        .evaluate(&states, &mut Everything(TargetSet::Train))
        .unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn evaluate_consistent_corpus_agrees_perfectly() {
    let states = load_corpus("evaluation").states();
    let mut splitter = PercentageSplitter::new(0.5);
    let score = engine().evaluate(&states, &mut splitter).unwrap();
    assert!((score - 1.0).abs() < 1e-9, "score was {score}");
}

#[test]
fn evaluate_never_reports_negative_agreement() {
    // Training says LOC, the test partition says ORG for the same strings.
    let states = vec![
        annotated("[[Paris|LOC]] is big. [[Paris|ORG]] is big. [[Rome|LOC]] is warm. [[Rome|ORG]] is warm."),
    ];
    let mut splitter = PercentageSplitter::new(0.5);
    let score = engine().evaluate(&states, &mut splitter).unwrap();
    // Raw agreement is well below zero here and gets clamped.
    assert_eq!(score, 0.0);
}

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["ab", "abc", "b", "ca", "cab", "a"]).prop_map(str::to_string)
}

proptest! {
    #[test]
    fn predicted_spans_align_with_tokens(
        keys in prop::collection::vec(prop::collection::vec(word(), 1..3), 1..6),
        text in prop::collection::vec(word(), 1..20),
    ) {
        let mut engine = engine();
        engine.pretrain(
            keys.iter()
                .map(|k| gazetteer::GazetteerEntry::new(k.join(" "), "X"))
                .collect(),
        );
        let mut context = RecommenderContext::new();
        engine.train(&mut context, &[]).unwrap();

        let mut target = segment(&format!("{}.", text.join(" ")));
        engine.predict(&context, &mut target).unwrap();

        for p in &target.predictions {
            prop_assert!(target.tokens.iter().any(|t| t.begin == p.offset.begin));
            prop_assert!(target.tokens.iter().any(|t| t.end == p.offset.end));
        }
    }
}
