use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;
use log::{debug, info};

use crate::{
    network::{manager::NetworkManager, NetworkAddress, NetworkState, NetworkStatus},
    plugin::error::PluginError,
    resources::annotations::{get_annotation, is_annotation_true},
};

use super::{state::get_eip_from_state, CNI_NETWORK_STATE_KEY, ENABLE_EIP_ANNOTATION_KEY};

/// What a single readiness pass ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessOutcome {
    /// the pod had no network status yet and now waits
    StatusCreated,
    /// the CNI hasn't reported the attachment yet
    AwaitingAttachment,
    Ready { eip: String },
}

/// Derives the pod network state from scratch, nothing of the previous pass is kept.
pub fn reconcile_readiness(
    pod: &mut Pod,
    network_manager: &dyn NetworkManager,
) -> Result<ReadinessOutcome, PluginError> {
    let mut status = match network_manager.network_status(pod)? {
        Some(status) => status,
        None => {
            debug!("Creating network status for '{}' pod", pod.name_any());

            let status = NetworkStatus {
                current_network_state: Some(NetworkState::Waiting),
                ..Default::default()
            };
            network_manager.update_network_status(status, pod)?;

            return Ok(ReadinessOutcome::StatusCreated);
        }
    };

    // TODO: report a disabled pod as a distinct outcome once the host stops requeueing on errors
    if !is_annotation_true(pod, ENABLE_EIP_ANNOTATION_KEY) {
        return Err(PluginError::InternalError(
            "gss-eip plugin is not enabled".into(),
        ));
    }

    let eip = match get_annotation(pod, CNI_NETWORK_STATE_KEY) {
        Some(raw) => get_eip_from_state(raw).map_err(|err| {
            debug!("Rejected CNI network status of '{}' pod: {err}", pod.name_any());
            PluginError::InternalError("gss-eip network status is invalid".into())
        })?,
        None => return Ok(ReadinessOutcome::AwaitingAttachment),
    };

    let pod_ip = pod
        .status
        .as_ref()
        .and_then(|status| status.pod_ip.clone())
        .unwrap_or_default();

    status.external_addresses = vec![NetworkAddress::from_ip(eip.as_str())];
    status.internal_addresses = vec![NetworkAddress::from_ip(pod_ip)];
    status.current_network_state = Some(NetworkState::Ready);

    network_manager.update_network_status(status, pod)?;

    info!("'{}' pod network is ready with {eip} address", pod.name_any());

    Ok(ReadinessOutcome::Ready { eip })
}
