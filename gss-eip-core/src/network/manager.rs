use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;
use log::warn;
use thiserror::Error;

use crate::resources::annotations::{
    get_annotation, is_annotation_true, NETWORK_CONF_ANNOTATION, NETWORK_DISABLED_ANNOTATION,
    NETWORK_STATUS_ANNOTATION, NETWORK_TYPE_ANNOTATION,
};

use super::{config::NetworkConfigEntry, NetworkState, NetworkStatus};

#[derive(Debug, Error)]
pub enum NetworkManagerError {
    #[error("Couldn't parse the network status! Reason: {}", .0)]
    StatusDeserializationError(serde_json::Error),
    #[error("Couldn't serialize the network status! Reason: {}", .0)]
    StatusSerializationError(serde_json::Error),
}

/// Reads and writes the pod network configuration and status on behalf of the plugins.
pub trait NetworkManager {
    fn network_config(&self, pod: &Pod) -> Vec<NetworkConfigEntry>;
    fn network_status(&self, pod: &Pod) -> Result<Option<NetworkStatus>, NetworkManagerError>;
    fn update_network_status(
        &self,
        status: NetworkStatus,
        pod: &mut Pod,
    ) -> Result<(), NetworkManagerError>;
}

/// Keeps everything in pod annotations, persisting the pod is up to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationNetworkManager;

impl NetworkManager for AnnotationNetworkManager {
    fn network_config(&self, pod: &Pod) -> Vec<NetworkConfigEntry> {
        let raw = match get_annotation(pod, NETWORK_CONF_ANNOTATION) {
            Some(raw) => raw,
            None => return Vec::new(),
        };

        serde_json::from_str(raw).unwrap_or_else(|err| {
            warn!(
                "Ignoring malformed network configuration of '{}' pod: {err}",
                pod.name_any()
            );
            Vec::new()
        })
    }

    fn network_status(&self, pod: &Pod) -> Result<Option<NetworkStatus>, NetworkManagerError> {
        get_annotation(pod, NETWORK_STATUS_ANNOTATION)
            .map(serde_json::from_str)
            .transpose()
            .map_err(NetworkManagerError::StatusDeserializationError)
    }

    fn update_network_status(
        &self,
        mut status: NetworkStatus,
        pod: &mut Pod,
    ) -> Result<(), NetworkManagerError> {
        status.network_type = get_annotation(pod, NETWORK_TYPE_ANNOTATION).map(str::to_owned);
        status.desired_network_state = Some(match is_annotation_true(pod, NETWORK_DISABLED_ANNOTATION) {
            true => NetworkState::NotReady,
            false => NetworkState::Ready,
        });

        let raw = serde_json::to_string(&status)
            .map_err(NetworkManagerError::StatusSerializationError)?;

        pod.annotations_mut()
            .insert(NETWORK_STATUS_ANNOTATION.to_owned(), raw);

        Ok(())
    }
}
