//! Sentence-level training/evaluation samples.

use curator_core::errors::CuratorResult;
use curator_core::models::{AnnotationState, Offset};

/// A labeled span inside a sample, in document offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub offset: Offset,
    pub text: String,
    pub label: String,
    pub score: f64,
}

/// One sentence with its tokens and labeled spans.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub doc_no: usize,
    /// Sentence offset in the document.
    pub offset: Offset,
    pub text: String,
    pub tokens: Vec<Offset>,
    pub spans: Vec<Span>,
}

impl Sample {
    pub fn len(&self) -> usize {
        self.offset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offset.is_empty()
    }

    pub fn is_labeled(&self) -> bool {
        !self.spans.is_empty()
    }

    pub fn has_token_ending_at(&self, end: usize) -> bool {
        self.tokens.iter().any(|t| t.end == end)
    }

    /// Same sentence with different spans.
    pub fn with_spans(&self, spans: Vec<Span>) -> Sample {
        Sample {
            doc_no: self.doc_no,
            offset: self.offset,
            text: self.text.clone(),
            tokens: self.tokens.clone(),
            spans,
        }
    }
}

/// One sample per sentence of every state, carrying the non-empty labels of
/// `layer`/`feature` annotations inside that sentence.
pub fn extract_samples(
    states: &[AnnotationState],
    layer: &str,
    feature: &str,
) -> CuratorResult<Vec<Sample>> {
    let mut data = Vec::new();
    for (doc_no, state) in states.iter().enumerate() {
        for &sentence in &state.sentences {
            let mut spans = Vec::new();
            for annotation in state.annotations_covered_by(layer, sentence) {
                let Some(label) = annotation.feature(feature).filter(|l| !l.is_empty()) else {
                    continue;
                };
                spans.push(Span {
                    offset: annotation.offset,
                    text: state.covered_text(annotation.offset)?.to_string(),
                    label: label.to_string(),
                    score: -1.0,
                });
            }
            data.push(Sample {
                doc_no,
                offset: sentence,
                text: state.covered_text(sentence)?.to_string(),
                tokens: state.tokens_covered_by(sentence).to_vec(),
                spans,
            });
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_core::models::Annotation;

    #[test]
    fn samples_follow_sentences() {
        let mut state = AnnotationState::new("Anna flew. Bob stayed.");
        state.sentences = vec![Offset::new(0, 10), Offset::new(11, 22)];
        state.tokens = vec![
            Offset::new(0, 4),
            Offset::new(5, 9),
            Offset::new(9, 10),
            Offset::new(11, 14),
            Offset::new(15, 21),
            Offset::new(21, 22),
        ];
        state.annotations = vec![
            Annotation::new("ner", Offset::new(0, 4)).with_feature("value", "PER"),
            Annotation::new("ner", Offset::new(11, 14)).with_feature("value", ""),
        ];

        let samples = extract_samples(&[state], "ner", "value").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].text, "Anna flew.");
        assert_eq!(samples[0].tokens.len(), 3);
        assert_eq!(samples[0].spans[0].label, "PER");
        assert!(!samples[1].is_labeled());
        assert!(samples[1].has_token_ending_at(22));
    }
}
