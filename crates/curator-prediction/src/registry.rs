//! Tool id → engine factory lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use curator_core::config::CuratorConfig;
use curator_core::errors::{CuratorError, CuratorResult};
use curator_core::models::{Feature, Layer};
use curator_core::traits::IRecommenderFactory;
use curator_stringmatch::StringMatchingRecommenderFactory;

#[derive(Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, Arc<dyn IRecommenderFactory>>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in engines.
    pub fn with_defaults(config: &CuratorConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(StringMatchingRecommenderFactory::new(
            config.string_match.clone(),
            config.evaluation.clone(),
        )));
        registry
    }

    /// Add a factory, replacing any with the same id.
    pub fn register(&mut self, factory: Arc<dyn IRecommenderFactory>) {
        self.factories.insert(factory.id().to_string(), factory);
    }

    pub fn get(&self, tool: &str) -> CuratorResult<Arc<dyn IRecommenderFactory>> {
        self.factories
            .get(tool)
            .cloned()
            .ok_or_else(|| CuratorError::FactoryNotFound {
                tool: tool.to_string(),
            })
    }

    /// Factories able to serve a layer/feature, ordered by id.
    pub fn available_for(&self, layer: &Layer, feature: &Feature) -> Vec<Arc<dyn IRecommenderFactory>> {
        let mut found: Vec<_> = self
            .factories
            .values()
            .filter(|f| f.accepts(layer, feature))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id().cmp(b.id()));
        found
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.factories.keys().collect();
        ids.sort();
        f.debug_struct("FactoryRegistry").field("factories", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_core::constants::STRING_MATCHING_TOOL;
    use test_fixtures::{named_entity_layer, VALUE};

    #[test]
    fn defaults_include_string_matcher() {
        let registry = FactoryRegistry::with_defaults(&CuratorConfig::default());
        assert_eq!(registry.get(STRING_MATCHING_TOOL).unwrap().id(), STRING_MATCHING_TOOL);
        let layer = named_entity_layer(1, false);
        assert_eq!(registry.available_for(&layer, &layer.features[0]).len(), 1);
        assert_eq!(layer.features[0].name, VALUE);
    }

    #[test]
    fn unknown_tool_is_an_error() {
        let registry = FactoryRegistry::new();
        assert!(matches!(
            registry.get("crf"),
            Err(CuratorError::FactoryNotFound { .. })
        ));
    }
}
