//! Shorthand constructors for schema, recommender, and record values.

use chrono::{Duration, TimeZone, Utc};
use curator_core::constants::STRING_MATCHING_TOOL;
use curator_core::models::{
    Feature, Layer, LayerId, LearningRecord, Offset, ProjectId, Recommender, RecommenderId,
    UserAction,
};

use crate::segment::{NAMED_ENTITY, VALUE};

/// Project id used by the fixtures.
pub const PROJECT: ProjectId = 1;

/// A `NamedEntity` layer with a single string feature `value`.
pub fn named_entity_layer(id: LayerId, allow_stacking: bool) -> Layer {
    Layer {
        id,
        name: NAMED_ENTITY.to_string(),
        enabled: true,
        allow_stacking,
        features: vec![Feature::string(VALUE)],
    }
}

/// A string-matching recommender on [`named_entity_layer`].
pub fn string_matcher(id: RecommenderId, layer: LayerId) -> Recommender {
    Recommender {
        id,
        name: format!("matcher-{id}"),
        project_id: PROJECT,
        layer_id: layer,
        layer_name: NAMED_ENTITY.to_string(),
        feature: VALUE.to_string(),
        tool: STRING_MATCHING_TOOL.to_string(),
        max_recommendations: 3,
        threshold: 0.0,
        always_selected: true,
        enabled: true,
        traits: serde_json::Value::Null,
    }
}

/// A learning record. `age` orders records: higher is older.
pub fn record(
    user: &str,
    layer: LayerId,
    document: &str,
    offset: Offset,
    label: &str,
    action: UserAction,
    age: i64,
) -> LearningRecord {
    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
    LearningRecord {
        user: user.to_string(),
        layer_id: layer,
        document_name: document.to_string(),
        feature: VALUE.to_string(),
        offset,
        label: label.to_string(),
        action,
        changed_at: epoch - Duration::seconds(age),
    }
}
