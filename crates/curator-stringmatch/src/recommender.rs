//! Frequency-dictionary recommender.

use curator_core::config::{defaults, StringMatchConfig};
use curator_core::context::RecommenderContext;
use curator_core::errors::{CuratorError, CuratorResult, RecommendationError};
use curator_core::models::{AnnotationState, Offset, PredictedSpan, Recommender};
use curator_core::traits::{IDataSplitter, IRecommendationEngine, TargetSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::agreement::{alpha_unitizing, UnitizingStudy};
use crate::gazetteer::GazetteerEntry;
use crate::sample::{extract_samples, Sample, Span};
use crate::trie::KeyNormalization;
use crate::{DictEntry, Dictionary};

/// Context key of the trained dictionary.
pub const KEY_MODEL: &str = "model";

/// Engine-specific settings read from a recommender's `traits`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringMatchingTraits {
    /// Overrides `string_match.normalize_whitespace` when set.
    pub normalize_whitespace: Option<bool>,
}

impl StringMatchingTraits {
    pub fn from_json(value: &serde_json::Value) -> CuratorResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone()).map_err(|e| {
            RecommendationError::InvalidTraits {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Learns which labels surface strings carry and suggests them wherever the
/// same strings reappear on token boundaries.
#[derive(Debug, Clone)]
pub struct StringMatchingRecommender {
    name: String,
    layer_name: String,
    feature_name: String,
    max_recommendations: usize,
    normalization: KeyNormalization,
    min_labeled_samples: usize,
    pretrain_data: Vec<GazetteerEntry>,
}

impl StringMatchingRecommender {
    pub fn new(
        recommender: &Recommender,
        traits: &StringMatchingTraits,
        config: &StringMatchConfig,
    ) -> Self {
        let normalize = traits
            .normalize_whitespace
            .unwrap_or(config.normalize_whitespace);
        let max_recommendations = if recommender.max_recommendations == 0 {
            config.default_max_recommendations
        } else {
            recommender.max_recommendations
        };
        Self {
            name: recommender.name.clone(),
            layer_name: recommender.layer_name.clone(),
            feature_name: recommender.feature.clone(),
            max_recommendations,
            normalization: if normalize {
                KeyNormalization::Whitespace
            } else {
                KeyNormalization::Exact
            },
            min_labeled_samples: defaults::DEFAULT_MIN_LABELED_SAMPLES,
            pretrain_data: Vec::new(),
        }
    }

    /// Labeled samples each evaluation partition needs before scoring.
    pub fn with_min_labeled_samples(mut self, min: usize) -> Self {
        self.min_labeled_samples = min;
        self
    }

    /// Seed data folded into every dictionary before annotated data.
    pub fn pretrain(&mut self, entries: Vec<GazetteerEntry>) {
        self.pretrain_data = entries;
    }

    pub fn max_recommendations(&self) -> usize {
        self.max_recommendations
    }

    fn create_dictionary(&self) -> Dictionary {
        Dictionary::new(self.normalization)
    }

    /// Build a dictionary from the pretrain data and every labeled
    /// annotation of the target layer.
    pub fn train_dictionary(&self, states: &[AnnotationState]) -> CuratorResult<Dictionary> {
        let mut dict = self.create_dictionary();
        for entry in &self.pretrain_data {
            learn(&mut dict, &entry.text, &entry.label);
        }
        for state in states {
            for annotation in state.annotations_of(&self.layer_name) {
                if let Some(label) = annotation.feature(&self.feature_name) {
                    learn(&mut dict, state.covered_text(annotation.offset)?, label);
                }
            }
        }
        Ok(dict)
    }
}

/// Record one observation. Blank labels are not learned.
pub(crate) fn learn(dict: &mut Dictionary, text: &str, label: &str) {
    if label.trim().is_empty() {
        return;
    }
    dict.get_or_insert_with(text, || DictEntry::new(text))
        .put(label);
}

/// Longest dictionary match at every token start whose end is also a token
/// end. `base` is the document offset of `haystack`.
fn match_spans(
    dict: &Dictionary,
    haystack: &str,
    base: usize,
    tokens: &[Offset],
    max_recommendations: usize,
) -> Vec<Span> {
    let mut spans = Vec::new();
    for token in tokens {
        let Some(start) = token.begin.checked_sub(base) else {
            continue;
        };
        let Some(m) = dict.lookup(haystack, start) else {
            continue;
        };
        let begin = token.begin;
        let end = begin + m.length;

        // The match must end on a token boundary, or it is a partial word.
        if !tokens.iter().any(|t| t.end == end) {
            continue;
        }
        let Some(text) = haystack.get(start..start + m.length) else {
            continue;
        };
        for stats in m.value.best(max_recommendations) {
            spans.push(Span {
                offset: Offset::new(begin, end),
                text: text.to_string(),
                label: stats.label,
                score: stats.rel_freq,
            });
        }
    }
    spans
}

fn add_to_study<'a>(
    study: &mut UnitizingStudy,
    samples: impl IntoIterator<Item = &'a Sample>,
    rater: usize,
) {
    // Offset of the current sample within the continuum.
    let mut offset = 0;
    for sample in samples {
        for span in &sample.spans {
            let begin_in_sample = span.offset.begin - sample.offset.begin;
            study.add_unit(offset + begin_in_sample, span.offset.len(), rater, span.label.clone());
        }
        offset += sample.len();
    }
}

impl IRecommendationEngine for StringMatchingRecommender {
    fn predicted_layer(&self) -> &str {
        &self.layer_name
    }

    fn predicted_feature(&self) -> &str {
        &self.feature_name
    }

    fn train(
        &self,
        context: &mut RecommenderContext,
        states: &[AnnotationState],
    ) -> CuratorResult<()> {
        let dict = self.train_dictionary(states)?;
        let entries = dict.len();
        context.put(KEY_MODEL, dict)?;
        context.mark_ready_for_prediction();
        debug!(recommender = %self.name, entries, "learned dictionary model");
        Ok(())
    }

    fn predict(
        &self,
        context: &RecommenderContext,
        state: &mut AnnotationState,
    ) -> CuratorResult<()> {
        if !context.is_ready_for_prediction() {
            return Err(CuratorError::ModelNotReady {
                recommender: self.name.clone(),
            });
        }
        let dict: &Dictionary = context.get(KEY_MODEL)?;

        let spans: Vec<Span> = state
            .sentences
            .iter()
            .flat_map(|&sentence| {
                match_spans(
                    dict,
                    &state.text,
                    0,
                    state.tokens_covered_by(sentence),
                    self.max_recommendations,
                )
            })
            .collect();

        trace!(recommender = %self.name, spans = spans.len(), "predicted spans");
        state.predictions.extend(spans.into_iter().map(|span| PredictedSpan {
            layer: self.layer_name.clone(),
            feature: self.feature_name.clone(),
            offset: span.offset,
            label: Some(span.label),
            score: Some(span.score),
        }));
        Ok(())
    }

    fn evaluate(
        &self,
        states: &[AnnotationState],
        splitter: &mut dyn IDataSplitter,
    ) -> CuratorResult<f64> {
        let data = extract_samples(states, &self.layer_name, &self.feature_name)?;
        let mut training_set: Vec<&Sample> = Vec::new();
        let mut test_set: Vec<&Sample> = Vec::new();

        // The continuum spans all test samples laid end to end.
        let mut continuum = 0;
        for (idx, sample) in data.iter().enumerate() {
            match splitter.target_set(idx) {
                TargetSet::Train => training_set.push(sample),
                TargetSet::Test => {
                    continuum += sample.len();
                    test_set.push(sample);
                }
                TargetSet::Ignore => {}
            }
        }

        let training_labeled = training_set.iter().filter(|s| s.is_labeled()).count();
        let test_labeled = test_set.iter().filter(|s| s.is_labeled()).count();

        if training_labeled < self.min_labeled_samples || test_labeled < self.min_labeled_samples {
            info!(
                recommender = %self.name,
                training = training_set.len(),
                training_labeled,
                test = test_set.len(),
                test_labeled,
                total = data.len(),
                "not enough labeled data"
            );
            return Ok(0.0);
        }

        info!(
            recommender = %self.name,
            training = training_set.len(),
            training_labeled,
            test = test_set.len(),
            test_labeled,
            total = data.len(),
            "evaluating"
        );

        let mut dict = self.create_dictionary();
        for sample in &training_set {
            for span in &sample.spans {
                learn(&mut dict, &span.text, &span.label);
            }
        }

        let predicted: Vec<Sample> = test_set
            .iter()
            .map(|sample| {
                sample.with_spans(match_spans(
                    &dict,
                    &sample.text,
                    sample.offset.begin,
                    &sample.tokens,
                    self.max_recommendations,
                ))
            })
            .collect();

        let mut study = UnitizingStudy::new(2, continuum);
        add_to_study(&mut study, test_set.iter().copied(), 0);
        add_to_study(&mut study, predicted.iter(), 1);

        let score = alpha_unitizing(&study);
        debug!(recommender = %self.name, score, "unitizing agreement");

        // Negative agreement is reported as 0 so activation thresholds
        // keep 0 as their floor.
        Ok(score.max(0.0))
    }
}
