use gss_eip_core::plugin::error::PluginError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("Object is missing metadata!")]
    MissingObjectMetadata,
    #[error("Couldn't patch the resource! Reason: {}", .0)]
    KubeApiError(kube::Error),
    #[error("Network plugin '{}' failed! Reason: {}", .0, .1)]
    PluginError(&'static str, PluginError),
}
