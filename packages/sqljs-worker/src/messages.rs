use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::errors::BootstrapError;

// Messages from the host page
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum HostMessage {
    #[serde(rename = "init")]
    Init,
}

impl HostMessage {
    /// Returns `None` for anything that is not a recognized request. Only the
    /// `type` field is inspected; extra fields are ignored.
    pub fn from_js(data: &JsValue) -> Option<Self> {
        serde_wasm_bindgen::from_value(data.clone()).ok()
    }
}

// Messages to the host page
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum WorkerMessage {
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "error")]
    Error { error: String },
}

impl WorkerMessage {
    pub fn to_js(&self) -> Result<JsValue, BootstrapError> {
        Ok(serde_wasm_bindgen::to_value(self)?)
    }
}
