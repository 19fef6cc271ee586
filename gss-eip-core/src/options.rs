use std::{fs::File, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Io error: {}", .0)]
    IoError(std::io::Error),
    #[error("Deserialization error: {}", .0)]
    DeserializationError(serde_yaml::Error),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GssOptions {
    pub enable: bool,
    pub host_port: HostPortOptions,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HostPortOptions {
    pub range: HostPortRange,
    pub ip_map: Vec<HostPortMap>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct HostPortRange {
    pub max_port: i32,
    pub min_port: i32,
}

/// maps a node's internal address to its publicly reachable one
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct HostPortMap {
    pub inner: String,
    pub outer: String,
}

impl GssOptions {
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        debug!("Used options path: {path:?}");

        let file = File::open(path).map_err(OptionsError::IoError)?;

        serde_yaml::from_reader(file).map_err(OptionsError::DeserializationError)
    }

    pub fn valid(&self) -> bool {
        let range = &self.host_port.range;

        range.max_port > range.min_port && range.min_port > 0 && !self.host_port.ip_map.is_empty()
    }

    pub fn enabled(&self) -> bool {
        self.enable
    }
}
