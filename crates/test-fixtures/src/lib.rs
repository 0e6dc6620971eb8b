//! Test fixtures for Curator: corpus loaders, a whitespace segmenter, and
//! in-memory collaborator services with failure injection.

pub mod builders;
pub mod corpus;
pub mod segment;
pub mod services;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use builders::{named_entity_layer, record, string_matcher, PROJECT};
pub use corpus::{load_corpus, Corpus, CorpusDocument};
pub use segment::{annotated, segment, NAMED_ENTITY, VALUE};
pub use services::{
    InMemoryDocumentService, InMemoryLearningRecordService, InMemoryRecommenderService,
    InMemorySchemaService,
};

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "fixture data directory not found");
    }

    #[test]
    fn corpus_fixtures_exist() {
        assert!(fixture_exists("corpus/cities.json"));
        assert!(fixture_exists("corpus/gazetteer.tsv"));
    }
}
