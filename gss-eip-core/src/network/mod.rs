use std::fmt::Display;

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub mod config;
pub mod manager;

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    /// plugin name the status was written for
    pub network_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal_addresses: Vec<NetworkAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_addresses: Vec<NetworkAddress>,
    pub desired_network_state: Option<NetworkState>,
    pub current_network_state: Option<NetworkState>,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAddress {
    #[serde(default)]
    pub ip: String,
    pub ports: Option<Vec<NetworkPort>>,
    pub port_range: Option<NetworkPortRange>,
    pub end_point: Option<String>,
}

impl NetworkAddress {
    pub fn from_ip(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ..Default::default()
        }
    }
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPort {
    #[serde(default)]
    pub name: String,
    pub protocol: Option<String>,
    pub port: Option<IntOrString>,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPortRange {
    pub port_range: Option<String>,
    pub protocol: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkState {
    Ready,
    NotReady,
    Waiting,
    /// any state written by a newer or foreign collaborator
    #[serde(other)]
    Unknown,
}

impl Display for NetworkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkState::Ready => f.write_str("network is ready"),
            NetworkState::NotReady => f.write_str("network is not ready"),
            NetworkState::Waiting => f.write_str("waiting for the network to be attached"),
            NetworkState::Unknown => f.write_str("network state is unknown"),
        }
    }
}
