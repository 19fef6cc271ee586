use gss_eip_core::{network::manager::AnnotationNetworkManager, plugin::registry::PluginRegistry};
use kube::Client;

pub struct ReconcilerContext {
    pub client: Client,
    pub registry: PluginRegistry,
    pub network_manager: AnnotationNetworkManager,
    /// watched namespace, all of them when unset
    pub namespace: Option<String>,
}
