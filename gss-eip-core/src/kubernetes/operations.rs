use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Pod;
use kube::{
    api::{Patch, PatchParams},
    Client,
};
use log::debug;
use serde_json::json;

use super::GetApi;

/// Merge-patches pod annotations, `None` values remove the key.
pub async fn patch_pod_annotations(
    client: &Client,
    name: &str,
    namespace: &str,
    annotations: &BTreeMap<String, Option<String>>,
    field_manager: &str,
) -> Result<Pod, kube::Error> {
    debug!(
        "Patching {} annotation(s) of '{name}' pod in '{namespace}' namespace",
        annotations.len()
    );

    let patch = json!({
        "metadata": {
            "annotations": annotations
        }
    });
    let patch_params = PatchParams {
        field_manager: Some(field_manager.to_owned()),
        ..Default::default()
    };

    client
        .namespaced_api::<Pod>(namespace)
        .patch(name, &patch_params, &Patch::Merge(&patch))
        .await
}
