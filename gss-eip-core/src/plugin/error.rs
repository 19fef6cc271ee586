use std::borrow::Cow;

use thiserror::Error;

use crate::network::manager::NetworkManagerError;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Internal error: {}", .0)]
    InternalError(Cow<'static, str>),
    #[error("Parameter error: {}", .0)]
    ParameterError(Cow<'static, str>),
    #[error("Api call error: {}", .0)]
    ApiCallError(Cow<'static, str>),
}

impl From<NetworkManagerError> for PluginError {
    fn from(value: NetworkManagerError) -> Self {
        PluginError::InternalError(value.to_string().into())
    }
}
