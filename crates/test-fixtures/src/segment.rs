//! Naive segmentation for building annotation states from plain text.

use curator_core::models::{Annotation, AnnotationState, Offset};

/// Layer name used by the fixtures.
pub const NAMED_ENTITY: &str = "NamedEntity";

/// Feature name used by the fixtures.
pub const VALUE: &str = "value";

/// Split `text` into tokens and sentences.
///
/// Tokens are maximal alphanumeric runs plus every other non-whitespace
/// character on its own. A sentence ends at a `.`, `!` or `?` token.
pub fn segment(text: &str) -> AnnotationState {
    let mut state = AnnotationState::new(text);

    let mut word_start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_alphanumeric() {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            state.tokens.push(Offset::new(start, i));
        }
        if !c.is_whitespace() {
            state.tokens.push(Offset::new(i, i + c.len_utf8()));
        }
    }
    if let Some(start) = word_start {
        state.tokens.push(Offset::new(start, text.len()));
    }

    let mut sentence_start: Option<usize> = None;
    let mut last_end = 0;
    for token in &state.tokens {
        sentence_start.get_or_insert(token.begin);
        last_end = token.end;
        if matches!(&text[token.begin..token.end], "." | "!" | "?") {
            if let Some(start) = sentence_start.take() {
                state.sentences.push(Offset::new(start, token.end));
            }
        }
    }
    if let Some(start) = sentence_start {
        state.sentences.push(Offset::new(start, last_end));
    }

    state
}

/// Segment marked-up text, turning every `[[surface|LABEL]]` into a
/// [`NAMED_ENTITY`] annotation. An empty label yields an annotation without
/// a [`VALUE`] feature.
///
/// # Panics
/// Panics on unbalanced markup.
pub fn annotated(marked: &str) -> AnnotationState {
    let mut plain = String::with_capacity(marked.len());
    let mut annotations = Vec::new();
    let mut rest = marked;

    while let Some(open) = rest.find("[[") {
        plain.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let close = after
            .find("]]")
            .unwrap_or_else(|| panic!("unbalanced markup in {marked:?}"));
        let inner = &after[..close];
        let (surface, label) = inner
            .split_once('|')
            .unwrap_or_else(|| panic!("missing label separator in {inner:?}"));

        let begin = plain.len();
        plain.push_str(surface);
        let mut annotation = Annotation::new(NAMED_ENTITY, Offset::new(begin, plain.len()));
        if !label.is_empty() {
            annotation = annotation.with_feature(VALUE, label);
        }
        annotations.push(annotation);
        rest = &after[close + 2..];
    }
    plain.push_str(rest);

    let mut state = segment(&plain);
    state.annotations = annotations;
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_punctuation() {
        let state = segment("Paris, France.");
        let tokens: Vec<&str> = state
            .tokens
            .iter()
            .map(|t| &state.text[t.begin..t.end])
            .collect();
        assert_eq!(tokens, vec!["Paris", ",", "France", "."]);
        assert_eq!(state.sentences, vec![Offset::new(0, 14)]);
    }

    #[test]
    fn splits_sentences() {
        let state = segment("I live. You go");
        assert_eq!(state.sentences, vec![Offset::new(0, 7), Offset::new(8, 14)]);
    }

    #[test]
    fn multibyte_tokens() {
        let state = segment("Zürich ist schön.");
        assert_eq!(state.covered_text(state.tokens[0]).unwrap(), "Zürich");
        assert_eq!(state.covered_text(state.tokens[2]).unwrap(), "schön");
    }

    #[test]
    fn markup_becomes_annotations() {
        let state = annotated("I like [[New York|LOC]] and [[IBM|]].");
        assert_eq!(state.text, "I like New York and IBM.");
        assert_eq!(state.annotations.len(), 2);
        assert_eq!(state.covered_text(state.annotations[0].offset).unwrap(), "New York");
        assert_eq!(state.annotations[0].feature(VALUE), Some("LOC"));
        assert_eq!(state.annotations[1].feature(VALUE), None);
    }
}
