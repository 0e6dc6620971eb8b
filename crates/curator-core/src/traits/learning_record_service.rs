use crate::errors::CuratorResult;
use crate::models::{LayerId, LearningRecord};

/// Store of human decisions on suggestions.
pub trait ILearningRecordService: Send + Sync {
    /// Records of `user` on `layer`, most recent first.
    fn list_records(&self, user: &str, layer: LayerId) -> CuratorResult<Vec<LearningRecord>>;

    fn create_record(&self, record: LearningRecord) -> CuratorResult<()>;
}
