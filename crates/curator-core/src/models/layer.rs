use serde::{Deserialize, Serialize};

pub type LayerId = u64;

/// Named, typed label slot on a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    /// Value type name, e.g. "string".
    #[serde(default = "default_value_type")]
    pub value_type: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Feature {
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: default_value_type(),
            enabled: true,
        }
    }
}

/// A named annotation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether several annotations may coexist at the same offset.
    #[serde(default)]
    pub allow_stacking: bool,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Layer {
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }

    pub fn enabled_features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| f.enabled)
    }
}

fn default_value_type() -> String {
    "string".to_string()
}

fn default_true() -> bool {
    true
}
