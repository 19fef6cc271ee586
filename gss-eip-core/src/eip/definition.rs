use serde::{Deserialize, Serialize};

/// A network attachment request as understood by the CNI meta plugin.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct EipDefinition {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub interface: String,
    #[serde(default, rename = "default-route", skip_serializing_if = "Vec::is_empty")]
    pub default_route: Vec<String>,
}

impl EipDefinition {
    /// The annotation always holds a list, even for a single attachment.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&[self])
    }
}
