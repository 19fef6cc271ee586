use k8s_openapi::api::core::v1::Pod;

use crate::{network::manager::NetworkManager, options::GssOptions};

use self::error::PluginError;

pub mod error;
pub mod registry;

/// A pod network implementation the host dispatches pod lifecycle events to.
///
/// The pod is owned by the caller for the duration of a call. Whatever a plugin
/// wrote to it before failing stays there, so callers persist the pod either way.
pub trait NetworkPlugin: Send + Sync {
    fn name(&self) -> &'static str;
    fn alias(&self) -> &'static str;
    fn init(&self, options: &GssOptions) -> Result<(), PluginError>;
    fn on_pod_added(
        &self,
        pod: &mut Pod,
        network_manager: &dyn NetworkManager,
    ) -> Result<(), PluginError>;
    fn on_pod_updated(
        &self,
        pod: &mut Pod,
        network_manager: &dyn NetworkManager,
    ) -> Result<(), PluginError>;
    fn on_pod_deleted(
        &self,
        pod: &Pod,
        network_manager: &dyn NetworkManager,
    ) -> Result<(), PluginError>;
}
