use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use thiserror::Error;

/// One interface entry of the CNI network-status annotation.
///
/// Accepts both the capitalized and the lowercase key spelling, different CNI
/// meta plugins disagree on it.
#[serde_as]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EipState {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, alias = "name")]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, alias = "interface")]
    pub interface: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, alias = "ips")]
    pub ips: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, alias = "mac")]
    pub mac: String,
}

#[derive(Debug, Error)]
pub enum EipStateError {
    #[error("eip network state is empty")]
    EmptyState,
    #[error("eip network state is invalid")]
    InvalidState(#[source] serde_json::Error),
    #[error("eip is empty")]
    EmptyEip,
}

pub fn parse_eip_states(raw: &str) -> Result<Vec<EipState>, EipStateError> {
    if raw.is_empty() {
        return Err(EipStateError::EmptyState);
    }

    let states: Option<Vec<EipState>> =
        serde_json::from_str(raw).map_err(EipStateError::InvalidState)?;

    Ok(states.unwrap_or_default())
}

/// Returns the first address of the first reported interface, the rest is ignored.
pub fn get_eip_from_state(raw: &str) -> Result<String, EipStateError> {
    parse_eip_states(raw)?
        .into_iter()
        .next()
        .and_then(|state| state.ips.into_iter().next())
        .ok_or(EipStateError::EmptyEip)
}
