//! Pre-training lists of `(text, label)` pairs.
//!
//! One entry per line: `text<TAB>label`. Blank lines and lines starting
//! with `#` are ignored.

use std::io::BufRead;

use curator_core::errors::{CuratorResult, RecommendationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    pub text: String,
    pub label: String,
}

impl GazetteerEntry {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Parse gazetteer lines from a reader.
pub fn parse(reader: impl BufRead) -> CuratorResult<Vec<GazetteerEntry>> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((text, label)) = trimmed.split_once('\t') else {
            return Err(RecommendationError::MalformedGazetteer {
                line: idx + 1,
                content: line.clone(),
            }
            .into());
        };
        let (text, label) = (text.trim(), label.trim());
        if text.is_empty() || label.is_empty() {
            return Err(RecommendationError::MalformedGazetteer {
                line: idx + 1,
                content: line.clone(),
            }
            .into());
        }
        entries.push(GazetteerEntry::new(text, label));
    }
    Ok(entries)
}

/// Parse gazetteer lines from a string.
pub fn parse_str(source: &str) -> CuratorResult<Vec<GazetteerEntry>> {
    parse(source.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_core::CuratorError;

    #[test]
    fn parses_entries_and_skips_comments() {
        let source = "# cities\nParis\tLOC\n\nNew York\tLOC\nACME Corp\tORG\n";
        let entries = parse_str(source).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1], GazetteerEntry::new("New York", "LOC"));
    }

    #[test]
    fn missing_label_is_malformed() {
        let err = parse_str("Paris\tLOC\nBerlin\n").unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Recommendation(RecommendationError::MalformedGazetteer { line: 2, .. })
        ));
    }
}
