//! Marked-up document corpora stored as JSON fixtures.

use curator_core::models::AnnotationState;
use serde::{Deserialize, Serialize};

use crate::load_fixture;
use crate::segment::annotated;

/// One document in `[[surface|LABEL]]` markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusDocument {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    pub description: String,
    pub documents: Vec<CorpusDocument>,
}

impl Corpus {
    /// Segmented, annotated states in document order.
    pub fn states(&self) -> Vec<AnnotationState> {
        self.documents.iter().map(|d| annotated(&d.text)).collect()
    }

    /// Document names paired with their states.
    pub fn named_states(&self) -> Vec<(String, AnnotationState)> {
        self.documents
            .iter()
            .map(|d| (d.name.clone(), annotated(&d.text)))
            .collect()
    }
}

/// Load a corpus from `data/corpus/<name>.json`.
pub fn load_corpus(name: &str) -> Corpus {
    load_fixture(&format!("corpus/{name}.json"))
}
