use serde::{Deserialize, Serialize};

/// Partition a sample is routed to during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSet {
    Train,
    Test,
    Ignore,
}

/// Policy deciding which evaluation partition each sample belongs to.
///
/// Called once per sample, in sample order.
pub trait IDataSplitter: Send {
    fn target_set(&mut self, sample_index: usize) -> TargetSet;
}
