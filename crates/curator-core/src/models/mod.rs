mod annotation_state;
mod document;
mod layer;
mod learning_record;
mod offset;
mod predictions;
mod recommender;
mod suggestion;
mod suggestion_group;

pub use annotation_state::{Annotation, AnnotationState, PredictedSpan};
pub use document::{Document, DocumentId, Project, ProjectId};
pub use layer::{Feature, Layer, LayerId};
pub use learning_record::{LearningRecord, UserAction};
pub use offset::Offset;
pub use predictions::Predictions;
pub use recommender::{Recommender, RecommenderId};
pub use suggestion::{HideFlags, Suggestion};
pub use suggestion_group::{Delta, GroupKey, SuggestionGroup};
