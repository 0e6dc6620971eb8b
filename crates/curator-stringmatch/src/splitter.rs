//! Deterministic percentage-based train/test routing.

use curator_core::traits::{IDataSplitter, TargetSet};

/// Routes a sample to TEST whenever the running test share is below the
/// target, and to TRAIN otherwise. The first sample always goes to TRAIN.
#[derive(Debug, Clone)]
pub struct PercentageSplitter {
    test_percentage: f64,
    seen: usize,
    tested: usize,
}

impl PercentageSplitter {
    /// `test_percentage` is clamped to `[0, 1]`.
    pub fn new(test_percentage: f64) -> Self {
        Self {
            test_percentage: test_percentage.clamp(0.0, 1.0),
            seen: 0,
            tested: 0,
        }
    }

    pub fn test_percentage(&self) -> f64 {
        self.test_percentage
    }
}

impl IDataSplitter for PercentageSplitter {
    fn target_set(&mut self, _sample_index: usize) -> TargetSet {
        let target = if self.seen > 0
            && (self.tested as f64) < self.test_percentage * self.seen as f64
        {
            self.tested += 1;
            TargetSet::Test
        } else {
            TargetSet::Train
        };
        self.seen += 1;
        target
    }
}
