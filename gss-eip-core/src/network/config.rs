use serde::{Deserialize, Serialize};

/// A single `name`/`value` pair of the pod network configuration.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkConfigEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl NetworkConfigEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
