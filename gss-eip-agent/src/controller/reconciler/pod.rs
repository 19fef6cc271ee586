use std::{sync::Arc, time::Duration};

use gss_eip_core::{
    helpers::RequireMetadata,
    kubernetes::operations::patch_pod_annotations,
    network::manager::NetworkManager,
    plugin::{error::PluginError, registry::PluginRegistry, NetworkPlugin},
    resources::annotations::{get_annotation, get_annotations_diff, NETWORK_STATUS_ANNOTATION},
};
use k8s_openapi::api::core::v1::Pod;
use kube::{runtime::controller::Action, ResourceExt};
use log::info;

use crate::controller::AGENT_FIELD_MANAGER;

use super::{context::ReconcilerContext, error::ReconcilerError};

// readiness is re-derived periodically even without pod changes
const SUCCESS_REQUEUE_SECS: u64 = 60;
const ERROR_REQUEUE_SECS: u64 = 10;
const API_ERROR_REQUEUE_SECS: u64 = 30;
const PARAMETER_ERROR_REQUEUE_SECS: u64 = 60 * 5;

pub async fn reconcile_pod(
    object: Arc<Pod>,
    context: Arc<ReconcilerContext>,
) -> Result<Action, ReconcilerError> {
    let plugin = match get_pod_event(&context.registry, &object) {
        PodEvent::Unmanaged => return Ok(Action::await_change()),
        PodEvent::Deleted(plugin) => {
            plugin
                .on_pod_deleted(&object, &context.network_manager)
                .map_err(|err| ReconcilerError::PluginError(plugin.name(), err))?;

            return Ok(Action::await_change());
        }
        PodEvent::Changed(plugin) => plugin,
    };

    let mut pod = object.as_ref().clone();
    let dispatch_result = dispatch_pod_event(plugin.as_ref(), &mut pod, &context.network_manager);
    let diff = get_annotations_diff(object.annotations(), pod.annotations());

    // whatever the plugin managed to commit is persisted, even if it failed afterwards
    if !diff.is_empty() {
        patch_pod_annotations(
            &context.client,
            object.require_name_or(ReconcilerError::MissingObjectMetadata)?,
            object.require_namespace_or(ReconcilerError::MissingObjectMetadata)?,
            &diff,
            AGENT_FIELD_MANAGER,
        )
        .await
        .map_err(ReconcilerError::KubeApiError)?;
    }

    dispatch_result.map_err(|err| ReconcilerError::PluginError(plugin.name(), err))?;

    Ok(Action::requeue(Duration::from_secs(SUCCESS_REQUEUE_SECS)))
}

enum PodEvent {
    /// no registered plugin owns the pod network
    Unmanaged,
    Deleted(Arc<dyn NetworkPlugin>),
    Changed(Arc<dyn NetworkPlugin>),
}

fn get_pod_event(registry: &PluginRegistry, pod: &Pod) -> PodEvent {
    match registry.for_pod(pod) {
        None => PodEvent::Unmanaged,
        Some(plugin) if pod.metadata.deletion_timestamp.is_some() => PodEvent::Deleted(plugin),
        Some(plugin) => PodEvent::Changed(plugin),
    }
}

pub fn reconcile_pod_error(
    _object: Arc<Pod>,
    error: &ReconcilerError,
    _context: Arc<ReconcilerContext>,
) -> Action {
    Action::requeue(get_error_requeue_duration(error))
}

fn get_error_requeue_duration(error: &ReconcilerError) -> Duration {
    match error {
        ReconcilerError::PluginError(_, PluginError::ParameterError(_)) => {
            Duration::from_secs(PARAMETER_ERROR_REQUEUE_SECS)
        }
        ReconcilerError::PluginError(_, PluginError::ApiCallError(_))
        | ReconcilerError::KubeApiError(_) => Duration::from_secs(API_ERROR_REQUEUE_SECS),
        _ => Duration::from_secs(ERROR_REQUEUE_SECS),
    }
}

/// A pod without any network status is treated as newly added.
///
/// The attachment request is written after the pod already exists, so it only
/// takes effect if it lands before the kubelet sets up the pod sandbox and the
/// CNI meta plugin reads it. Pods that lose that race keep waiting for an
/// attachment until they are recreated. Closing the gap needs a mutating
/// admission webhook that applies the request at pod creation.
fn dispatch_pod_event(
    plugin: &dyn NetworkPlugin,
    pod: &mut Pod,
    network_manager: &dyn NetworkManager,
) -> Result<(), PluginError> {
    if get_annotation(pod, NETWORK_STATUS_ANNOTATION).is_none() {
        info!(
            "Pod '{}' joined '{}' network",
            pod.name_any(),
            plugin.name()
        );

        plugin.on_pod_added(pod, network_manager)?;
    }

    plugin.on_pod_updated(pod, network_manager)
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, time::Duration};

    use gss_eip_core::{
        eip::{EipPlugin, CNI_NETWORK_ATTACH_KEY, CNI_NETWORK_STATE_KEY},
        network::{
            manager::{AnnotationNetworkManager, NetworkManager},
            NetworkState,
        },
        plugin::{error::PluginError, registry::create_default_registry},
        resources::annotations::{
            get_annotations_diff, NETWORK_CONF_ANNOTATION, NETWORK_STATUS_ANNOTATION,
            NETWORK_TYPE_ANNOTATION,
        },
    };
    use k8s_openapi::{
        api::core::v1::{Pod, PodStatus},
        apimachinery::pkg::apis::meta::v1::Time,
        chrono::Utc,
    };
    use kube::{core::ObjectMeta, error::ErrorResponse, ResourceExt};

    use crate::controller::reconciler::error::ReconcilerError;

    use super::{dispatch_pod_event, get_error_requeue_duration, get_pod_event, PodEvent};

    fn new_pod() -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some("gs-0".to_owned()),
                namespace: Some("default".to_owned()),
                annotations: Some(BTreeMap::from([
                    (NETWORK_TYPE_ANNOTATION.to_owned(), "EIP-Network".to_owned()),
                    (
                        NETWORK_CONF_ANNOTATION.to_owned(),
                        r#"[{"name":"CniAttach","value":"sriov-eip"},{"name":"Enable","value":"true"}]"#
                            .to_owned(),
                    ),
                ])),
                ..Default::default()
            },
            status: Some(PodStatus {
                pod_ip: Some("10.1.2.3".to_owned()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn new_pod_is_added_and_starts_waiting() {
        let mut pod = new_pod();

        dispatch_pod_event(&EipPlugin, &mut pod, &AnnotationNetworkManager).unwrap();

        let status = AnnotationNetworkManager.network_status(&pod).unwrap().unwrap();

        assert_eq!(
            pod.annotations()[CNI_NETWORK_ATTACH_KEY],
            r#"[{"name":"sriov-eip"}]"#
        );
        assert_eq!(status.current_network_state, Some(NetworkState::Waiting));
        assert_eq!(status.network_type.as_deref(), Some("EIP-Network"));
    }

    #[test]
    fn known_pod_is_not_translated_again() {
        let mut pod = new_pod();
        dispatch_pod_event(&EipPlugin, &mut pod, &AnnotationNetworkManager).unwrap();

        pod.annotations_mut().insert(
            NETWORK_CONF_ANNOTATION.to_owned(),
            r#"[{"name":"CniAttach","value":"changed"}]"#.to_owned(),
        );
        dispatch_pod_event(&EipPlugin, &mut pod, &AnnotationNetworkManager).unwrap();

        assert_eq!(
            pod.annotations()[CNI_NETWORK_ATTACH_KEY],
            r#"[{"name":"sriov-eip"}]"#
        );
    }

    #[test]
    fn attached_pod_becomes_ready_and_stays_unchanged() {
        let mut pod = new_pod();
        dispatch_pod_event(&EipPlugin, &mut pod, &AnnotationNetworkManager).unwrap();

        pod.annotations_mut().insert(
            CNI_NETWORK_STATE_KEY.to_owned(),
            r#"[{"Ips":["203.0.113.9"]}]"#.to_owned(),
        );
        dispatch_pod_event(&EipPlugin, &mut pod, &AnnotationNetworkManager).unwrap();

        let ready = pod.clone();
        dispatch_pod_event(&EipPlugin, &mut pod, &AnnotationNetworkManager).unwrap();

        let status = AnnotationNetworkManager.network_status(&pod).unwrap().unwrap();

        assert_eq!(status.current_network_state, Some(NetworkState::Ready));
        assert!(get_annotations_diff(ready.annotations(), pod.annotations()).is_empty());
    }

    #[test]
    fn failed_pass_keeps_committed_status() {
        let mut pod = new_pod();
        pod.annotations_mut().insert(
            NETWORK_CONF_ANNOTATION.to_owned(),
            r#"[{"name":"CniAttach","value":"sriov-eip"}]"#.to_owned(),
        );
        let original = pod.clone();

        dispatch_pod_event(&EipPlugin, &mut pod, &AnnotationNetworkManager).unwrap();
        let result = dispatch_pod_event(&EipPlugin, &mut pod, &AnnotationNetworkManager);

        assert!(matches!(result, Err(PluginError::InternalError(_))));
        assert!(get_annotations_diff(original.annotations(), pod.annotations())
            .contains_key(NETWORK_STATUS_ANNOTATION));
    }

    #[test]
    fn parameter_errors_are_retried_less_often() {
        let parameter_error =
            ReconcilerError::PluginError("Gss-EIP", PluginError::ParameterError("bad".into()));
        let internal_error =
            ReconcilerError::PluginError("Gss-EIP", PluginError::InternalError("bad".into()));

        assert!(
            get_error_requeue_duration(&parameter_error)
                > get_error_requeue_duration(&internal_error)
        );
        assert_eq!(
            get_error_requeue_duration(&ReconcilerError::MissingObjectMetadata),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn api_call_errors_are_retried_like_kube_errors() {
        let api_call_error =
            ReconcilerError::PluginError("Gss-EIP", PluginError::ApiCallError("timeout".into()));
        let kube_error = ReconcilerError::KubeApiError(kube::Error::Api(ErrorResponse {
            status: "Failure".to_owned(),
            message: "conflict".to_owned(),
            reason: "Conflict".to_owned(),
            code: 409,
        }));

        assert_eq!(
            get_error_requeue_duration(&api_call_error),
            get_error_requeue_duration(&kube_error)
        );
        assert_eq!(
            get_error_requeue_duration(&api_call_error),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn pods_of_unknown_networks_are_unmanaged() {
        let registry = create_default_registry().unwrap();
        let mut pod = new_pod();

        pod.annotations_mut()
            .insert(NETWORK_TYPE_ANNOTATION.to_owned(), "Kubernetes-HostPort".to_owned());
        assert!(matches!(get_pod_event(&registry, &pod), PodEvent::Unmanaged));

        pod.annotations_mut().remove(NETWORK_TYPE_ANNOTATION);
        assert!(matches!(get_pod_event(&registry, &pod), PodEvent::Unmanaged));
    }

    #[test]
    fn terminating_pod_is_a_deletion() {
        let registry = create_default_registry().unwrap();
        let mut pod = new_pod();
        pod.metadata.deletion_timestamp = Some(Time(Utc::now()));

        match get_pod_event(&registry, &pod) {
            PodEvent::Deleted(plugin) => assert_eq!(plugin.name(), "Gss-EIP"),
            _ => panic!("terminating pod wasn't treated as deleted"),
        }
    }

    #[test]
    fn live_pod_is_a_change() {
        let registry = create_default_registry().unwrap();

        assert!(matches!(
            get_pod_event(&registry, &new_pod()),
            PodEvent::Changed(_)
        ));
    }
}
