//! EIP network plugin.
//!
//! Relies on an SR-IOV capable CNI to hand a virtual function with a directly
//! routable address to the pod. The plugin only requests the attachment and
//! publishes whatever address the CNI reports back.

use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;
use log::{debug, info};

use crate::{
    network::manager::NetworkManager,
    options::GssOptions,
    plugin::{error::PluginError, NetworkPlugin},
    resources::annotations::merge_annotations,
};

use self::{reconciler::reconcile_readiness, translator::translate_network_config};

pub mod definition;
pub mod reconciler;
pub mod state;
pub mod translator;

pub const EIP_NETWORK: &str = "Gss-EIP";
pub const EIP_NETWORK_ALIAS: &str = "EIP-Network";

pub const CNI_NETWORK_ATTACH_CONFIG_NAME: &str = "CniAttach";
pub const CNI_NAMESPACE_CONFIG_NAME: &str = "CniNamespace";
pub const CNI_INTERFACE_CONFIG_NAME: &str = "CniInterface";
pub const CNI_GATEWAY_CONFIG_NAME: &str = "CniGateway";
pub const FIXED_EIP_CONFIG_NAME: &str = "Fixed";
pub const ENABLE_EIP_ANNOTATION_CONFIG_NAME: &str = "Enable";

pub const ENABLE_EIP_ANNOTATION_KEY: &str = "gss-eip-enable";
pub const FIXED_EIP_KEY: &str = "gss-fixed";
pub const CNI_NETWORK_STATE_KEY: &str = "k8s.v1.cni.cncf.io/network-status";
pub const CNI_NETWORK_ATTACH_KEY: &str = "k8s.v1.cni.cncf.io/networks";

#[derive(Debug, Clone, Copy, Default)]
pub struct EipPlugin;

impl NetworkPlugin for EipPlugin {
    fn name(&self) -> &'static str {
        EIP_NETWORK
    }

    fn alias(&self) -> &'static str {
        EIP_NETWORK_ALIAS
    }

    fn init(&self, _options: &GssOptions) -> Result<(), PluginError> {
        Ok(())
    }

    fn on_pod_added(
        &self,
        pod: &mut Pod,
        network_manager: &dyn NetworkManager,
    ) -> Result<(), PluginError> {
        let config = network_manager.network_config(pod);
        let annotations = translate_network_config(&config)
            .into_annotations()
            .map_err(|_| PluginError::InternalError("gss-eip params is invalid".into()))?;

        info!("Requesting EIP attachment for '{}' pod", pod.name_any());

        merge_annotations(pod, annotations);

        Ok(())
    }

    fn on_pod_updated(
        &self,
        pod: &mut Pod,
        network_manager: &dyn NetworkManager,
    ) -> Result<(), PluginError> {
        let outcome = reconcile_readiness(pod, network_manager)?;

        debug!("'{}' pod readiness pass: {outcome:?}", pod.name_any());

        Ok(())
    }

    fn on_pod_deleted(
        &self,
        _pod: &Pod,
        _network_manager: &dyn NetworkManager,
    ) -> Result<(), PluginError> {
        Ok(())
    }
}
