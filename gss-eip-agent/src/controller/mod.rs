use std::sync::Arc;

use futures::StreamExt;
use gss_eip_core::kubernetes::GetApi;
use k8s_openapi::api::core::v1::Pod;
use kube::{
    runtime::{watcher::Config, Controller},
    Api,
};
use log::info;

use crate::helpers::log_controller_result;

use self::reconciler::{
    context::ReconcilerContext,
    pod::{reconcile_pod, reconcile_pod_error},
};

pub mod reconciler;

pub const AGENT_FIELD_MANAGER: &str = "gss-eip-agent";

pub async fn start_pod_controller(context: Arc<ReconcilerContext>) {
    info!("Creating pod controller...");

    let pod_api: Api<Pod> = match &context.namespace {
        Some(namespace) => context.client.namespaced_api(namespace),
        None => context.client.global_api(),
    };
    let controller = Controller::new(pod_api, Config::default())
        .shutdown_on_signal()
        .run(reconcile_pod, reconcile_pod_error, context.clone())
        .for_each(log_controller_result::<Pod, _>);

    info!("Pod controller created!");

    controller.await;

    info!("Exiting pod controller!");
}
