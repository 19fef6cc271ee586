use std::collections::BTreeMap;

use crate::network::config::NetworkConfigEntry;

use super::{
    definition::EipDefinition, CNI_GATEWAY_CONFIG_NAME, CNI_INTERFACE_CONFIG_NAME,
    CNI_NAMESPACE_CONFIG_NAME, CNI_NETWORK_ATTACH_CONFIG_NAME, CNI_NETWORK_ATTACH_KEY,
    ENABLE_EIP_ANNOTATION_CONFIG_NAME, ENABLE_EIP_ANNOTATION_KEY, FIXED_EIP_CONFIG_NAME,
    FIXED_EIP_KEY,
};

/// Result of translating the pod network configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EipTranslation {
    pub definition: EipDefinition,
    /// flag annotations that bypass the attachment request
    pub annotations: BTreeMap<String, String>,
}

impl EipTranslation {
    /// All annotations to put on the pod, including the encoded attachment request.
    pub fn into_annotations(self) -> Result<BTreeMap<String, String>, serde_json::Error> {
        let mut annotations = self.annotations;

        annotations.insert(CNI_NETWORK_ATTACH_KEY.to_owned(), self.definition.encode()?);

        Ok(annotations)
    }
}

/// Later entries win over earlier ones with the same name, unknown names are skipped.
pub fn translate_network_config<'a>(
    config: impl IntoIterator<Item = &'a NetworkConfigEntry>,
) -> EipTranslation {
    let mut translation = EipTranslation::default();

    for entry in config {
        match entry.name.as_str() {
            CNI_NETWORK_ATTACH_CONFIG_NAME => translation.definition.name = entry.value.clone(),
            CNI_NAMESPACE_CONFIG_NAME => translation.definition.namespace = entry.value.clone(),
            CNI_INTERFACE_CONFIG_NAME => translation.definition.interface = entry.value.clone(),
            CNI_GATEWAY_CONFIG_NAME => {
                translation.definition.default_route =
                    entry.value.split(',').map(str::to_owned).collect()
            }
            FIXED_EIP_CONFIG_NAME => {
                translation
                    .annotations
                    .insert(FIXED_EIP_KEY.to_owned(), entry.value.clone());
            }
            ENABLE_EIP_ANNOTATION_CONFIG_NAME => {
                translation
                    .annotations
                    .insert(ENABLE_EIP_ANNOTATION_KEY.to_owned(), entry.value.clone());
            }
            _ => (),
        }
    }

    translation
}
