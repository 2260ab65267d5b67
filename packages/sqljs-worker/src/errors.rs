use thiserror::Error;
use wasm_bindgen::prelude::*;

use crate::utils::describe_js_value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Asset base URL must be a non-empty string")]
    EmptyAssetBase,
    #[error("Loader script name must be a non-empty string")]
    EmptyLoaderScript,
    #[error("Worker global {0} must be a string")]
    NotAString(String),
    #[error("Worker global {0} could not be read")]
    Unreadable(String),
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    SerdeError(#[from] serde_wasm_bindgen::Error),
    #[error(transparent)]
    EncodingError(#[from] serde_json::Error),
    #[error("JavaScript error: {0:?}")]
    JsError(JsValue),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("SQL engine loader {0} is not available in this scope")]
    LoaderUnavailable(String),
    #[error("Not running inside a dedicated worker")]
    NotInWorker,
}

impl BootstrapError {
    /// Human-readable failure text sent back to the host. Errors thrown by
    /// JavaScript are reported by their own message, without a prefix.
    pub fn reason(&self) -> String {
        match self {
            BootstrapError::JsError(value) => describe_js_value(value),
            other => other.to_string(),
        }
    }
}

impl From<JsValue> for BootstrapError {
    fn from(value: JsValue) -> Self {
        BootstrapError::JsError(value)
    }
}

impl From<BootstrapError> for JsValue {
    fn from(value: BootstrapError) -> Self {
        JsError::new(&value.to_string()).into()
    }
}
