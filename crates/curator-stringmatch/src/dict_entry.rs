//! Label multiset for one surface string.

use serde::{Deserialize, Serialize};

/// How often one label was observed for a surface string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStats {
    /// The label, e.g. `PER` or `LOC`.
    pub label: String,
    /// Observations of this label.
    pub count: u32,
    /// `count` relative to all observations of the surface string.
    pub rel_freq: f64,
}

/// Observed labels of one dictionary key, in first-seen order.
///
/// Counts only grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    key: String,
    labels: Vec<(String, u32)>,
}

impl DictEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            labels: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Record one observation of `label`.
    pub fn put(&mut self, label: &str) {
        match self.labels.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.labels.push((label.to_string(), 1)),
        }
    }

    pub fn count(&self, label: &str) -> u32 {
        self.labels
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0, |(_, c)| *c)
    }

    pub fn total(&self) -> u32 {
        self.labels.iter().map(|(_, c)| c).sum()
    }

    /// Up to `n` labels by descending count. Ties keep first-seen order.
    pub fn best(&self, n: usize) -> Vec<LabelStats> {
        let total = f64::from(self.total());
        let mut stats: Vec<LabelStats> = self
            .labels
            .iter()
            .map(|(label, count)| LabelStats {
                label: label.clone(),
                count: *count,
                rel_freq: f64::from(*count) / total,
            })
            .collect();
        // Stable sort, so equal counts stay in insertion order.
        stats.sort_by(|a, b| b.count.cmp(&a.count));
        stats.truncate(n);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn best_orders_by_frequency() {
        let mut entry = DictEntry::new("Paris");
        for label in ["LOC", "ORG", "LOC", "LOC"] {
            entry.put(label);
        }
        let best = entry.best(2);
        assert_eq!(best.len(), 2);
        assert_eq!(best[0].label, "LOC");
        assert!((best[0].rel_freq - 0.75).abs() < 1e-9);
        assert_eq!(best[1].label, "ORG");
        assert!((best[1].rel_freq - 0.25).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_first_seen_label() {
        let mut entry = DictEntry::new("Jordan");
        for label in ["PER", "LOC", "LOC", "PER"] {
            entry.put(label);
        }
        let best = entry.best(1);
        assert_eq!(best[0].label, "PER");
    }

    #[test]
    fn empty_entry_has_no_best() {
        assert!(DictEntry::new("x").best(3).is_empty());
    }

    proptest! {
        #[test]
        fn prop_best_bounded_and_sorted(
            labels in prop::collection::vec(prop::sample::select(vec!["A", "B", "C", "D"]), 1..40),
            n in 0usize..6,
        ) {
            let mut entry = DictEntry::new("k");
            for l in &labels {
                entry.put(l);
            }
            let best = entry.best(n);
            prop_assert!(best.len() <= n);
            for pair in best.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
            let freq_sum: f64 = entry.best(usize::MAX).iter().map(|s| s.rel_freq).sum();
            prop_assert!((freq_sum - 1.0).abs() < 1e-9);
        }
    }
}
