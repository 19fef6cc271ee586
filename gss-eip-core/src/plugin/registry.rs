use std::{collections::HashMap, sync::Arc};

use k8s_openapi::api::core::v1::Pod;
use log::info;

use crate::{
    eip::EipPlugin,
    options::GssOptions,
    resources::annotations::{get_annotation, NETWORK_TYPE_ANNOTATION},
};

use super::{error::PluginError, NetworkPlugin};

/// Plugins keyed by both their name and alias.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<&'static str, Arc<dyn NetworkPlugin>>,
}

impl PluginRegistry {
    pub fn register(&mut self, plugin: Arc<dyn NetworkPlugin>) -> Result<(), PluginError> {
        for key in [plugin.name(), plugin.alias()] {
            if self.plugins.contains_key(key) {
                return Err(PluginError::ParameterError(
                    format!("network plugin '{key}' is already registered").into(),
                ));
            }
        }

        info!("Registered '{}' ({}) network plugin", plugin.name(), plugin.alias());

        self.plugins.insert(plugin.alias(), plugin.clone());
        self.plugins.insert(plugin.name(), plugin);

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn NetworkPlugin>> {
        self.plugins.get(name).cloned()
    }

    pub fn for_pod(&self, pod: &Pod) -> Option<Arc<dyn NetworkPlugin>> {
        self.get(get_annotation(pod, NETWORK_TYPE_ANNOTATION)?)
    }

    pub fn init_all(&self, options: &GssOptions) -> Result<(), PluginError> {
        for (key, plugin) in &self.plugins {
            // aliases point at the same plugin
            if *key == plugin.name() {
                plugin.init(options)?;
            }
        }

        Ok(())
    }
}

pub fn create_default_registry() -> Result<PluginRegistry, PluginError> {
    let mut registry = PluginRegistry::default();

    registry.register(Arc::new(EipPlugin))?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, sync::Arc};

    use k8s_openapi::api::core::v1::Pod;
    use kube::core::ObjectMeta;

    use crate::{
        eip::{EipPlugin, EIP_NETWORK, EIP_NETWORK_ALIAS},
        plugin::error::PluginError,
        resources::annotations::NETWORK_TYPE_ANNOTATION,
    };

    use super::create_default_registry;

    fn pod_of_type(network_type: &str) -> Pod {
        Pod {
            metadata: ObjectMeta {
                annotations: Some(BTreeMap::from([(
                    NETWORK_TYPE_ANNOTATION.to_owned(),
                    network_type.to_owned(),
                )])),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn resolves_plugin_by_name_and_alias() {
        let registry = create_default_registry().unwrap();

        assert_eq!(registry.get(EIP_NETWORK).unwrap().name(), EIP_NETWORK);
        assert_eq!(registry.get(EIP_NETWORK_ALIAS).unwrap().name(), EIP_NETWORK);
        assert!(registry.get("Kubernetes-HostPort").is_none());
    }

    #[test]
    fn resolves_plugin_from_pod_annotation() {
        let registry = create_default_registry().unwrap();

        assert!(registry.for_pod(&pod_of_type(EIP_NETWORK_ALIAS)).is_some());
        assert!(registry.for_pod(&pod_of_type("unknown")).is_none());
        assert!(registry.for_pod(&Pod::default()).is_none());
    }

    #[test]
    fn rejects_duplicate_registration() {
        let mut registry = create_default_registry().unwrap();

        assert!(matches!(
            registry.register(Arc::new(EipPlugin)),
            Err(PluginError::ParameterError(_))
        ));
    }

    #[test]
    fn initializes_plugins() {
        let registry = create_default_registry().unwrap();

        registry.init_all(&Default::default()).unwrap();
    }
}
