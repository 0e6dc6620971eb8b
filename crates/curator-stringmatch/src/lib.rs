//! # curator-stringmatch
//!
//! Reference recommendation engine: a frequency dictionary over token-aligned
//! surface strings.
//!
//! - [`trie`]: ordered prefix structure with pluggable key normalization
//! - [`DictEntry`]: label multiset for one surface string
//! - [`StringMatchingRecommender`]: train / predict / evaluate
//! - [`agreement`]: Krippendorff's unitizing alpha for self-evaluation
//! - [`PercentageSplitter`]: deterministic train/test routing

pub mod agreement;
pub mod dict_entry;
pub mod factory;
pub mod gazetteer;
pub mod recommender;
pub mod sample;
pub mod splitter;
pub mod trie;

pub use dict_entry::{DictEntry, LabelStats};
pub use factory::StringMatchingRecommenderFactory;
pub use gazetteer::GazetteerEntry;
pub use recommender::{StringMatchingRecommender, StringMatchingTraits, KEY_MODEL};
pub use splitter::PercentageSplitter;
pub use trie::{KeyNormalization, Trie, TrieMatch};

/// The model a string-matching recommender stores in its context.
pub type Dictionary = Trie<DictEntry>;
