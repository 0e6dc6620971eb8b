use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Offset;
use crate::errors::{CuratorResult, DocumentError};

/// A human-made annotation on a named layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub layer: String,
    pub offset: Offset,
    /// Feature name to value. Absent features have no entry.
    #[serde(default)]
    pub features: BTreeMap<String, String>,
}

impl Annotation {
    pub fn new(layer: impl Into<String>, offset: Offset) -> Self {
        Self {
            layer: layer.into(),
            offset,
            features: BTreeMap::new(),
        }
    }

    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.features.insert(name.into(), value.into());
        self
    }

    pub fn feature(&self, name: &str) -> Option<&str> {
        self.features.get(name).map(String::as_str)
    }
}

/// A span written into a prediction workspace by a recommendation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedSpan {
    pub layer: String,
    pub feature: String,
    pub offset: Offset,
    pub label: Option<String>,
    pub score: Option<f64>,
}

/// The annotation state of one document for one user: text, segmentation,
/// human annotations, and (in a prediction workspace) predicted spans.
///
/// Sentences and tokens are kept sorted ascending by offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationState {
    pub text: String,
    #[serde(default)]
    pub sentences: Vec<Offset>,
    #[serde(default)]
    pub tokens: Vec<Offset>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub predictions: Vec<PredictedSpan>,
}

impl AnnotationState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Text under `offset`, or an error when the range is not a valid slice.
    pub fn covered_text(&self, offset: Offset) -> CuratorResult<&str> {
        self.text
            .get(offset.begin..offset.end)
            .ok_or_else(|| {
                DocumentError::OffsetOutOfBounds {
                    begin: offset.begin,
                    end: offset.end,
                    length: self.text.len(),
                }
                .into()
            })
    }

    /// Tokens lying entirely inside `offset`, in document order.
    ///
    /// Tokens must be sorted and must not overlap each other.
    pub fn tokens_covered_by(&self, offset: Offset) -> &[Offset] {
        let start = self.tokens.partition_point(|t| t.begin < offset.begin);
        let rest = &self.tokens[start..];
        let len = rest
            .iter()
            .take_while(|t| t.begin < offset.end && t.end <= offset.end)
            .count();
        &rest[..len]
    }

    /// Annotations of `layer`, in insertion order.
    pub fn annotations_of<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a Annotation> {
        self.annotations.iter().filter(move |a| a.layer == layer)
    }

    /// Annotations of `layer` lying entirely inside `offset`.
    pub fn annotations_covered_by<'a>(
        &'a self,
        layer: &'a str,
        offset: Offset,
    ) -> impl Iterator<Item = &'a Annotation> {
        self.annotations_of(layer)
            .filter(move |a| offset.covers(&a.offset))
    }

    /// Predicted spans of the given type.
    pub fn predictions_of<'a>(
        &'a self,
        layer: &'a str,
        feature: &'a str,
    ) -> impl Iterator<Item = &'a PredictedSpan> {
        self.predictions
            .iter()
            .filter(move |p| p.layer == layer && p.feature == feature)
    }

    /// Drop every predicted span of the given type. Returns how many were removed.
    pub fn remove_predictions(&mut self, layer: &str, feature: &str) -> usize {
        let before = self.predictions.len();
        self.predictions
            .retain(|p| !(p.layer == layer && p.feature == feature));
        before - self.predictions.len()
    }

    /// Offset covering the whole text.
    pub fn full_window(&self) -> Offset {
        Offset::new(0, self.text.len())
    }
}
