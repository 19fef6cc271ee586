use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;

/// name or alias of the plugin that owns the pod network
pub const NETWORK_TYPE_ANNOTATION: &str = "game.kruise.io/network-type";
/// JSON list of `{"name", "value"}` network configuration entries
pub const NETWORK_CONF_ANNOTATION: &str = "game.kruise.io/network-conf";
/// JSON encoded network status maintained by the network plugins
pub const NETWORK_STATUS_ANNOTATION: &str = "game.kruise.io/network-status";
/// set to "true" when the pod network is administratively disabled
pub const NETWORK_DISABLED_ANNOTATION: &str = "game.kruise.io/network-disabled";

pub fn get_annotation<'a>(pod: &'a Pod, key: &str) -> Option<&'a str> {
    pod.annotations().get(key).map(|value| value.as_str())
}

pub fn is_annotation_true(pod: &Pod, key: &str) -> bool {
    get_annotation(pod, key) == Some("true")
}

pub fn merge_annotations(pod: &mut Pod, annotations: BTreeMap<String, String>) {
    pod.annotations_mut().extend(annotations);
}

/// Computes a merge-patch friendly diff, removed keys map to `None`.
pub fn get_annotations_diff(
    old: &BTreeMap<String, String>,
    new: &BTreeMap<String, String>,
) -> BTreeMap<String, Option<String>> {
    let changed = new
        .iter()
        .filter(|(key, value)| old.get(*key) != Some(*value))
        .map(|(key, value)| (key.to_owned(), Some(value.to_owned())));
    let removed = old
        .keys()
        .filter(|key| !new.contains_key(*key))
        .map(|key| (key.to_owned(), None));

    changed.chain(removed).collect()
}
