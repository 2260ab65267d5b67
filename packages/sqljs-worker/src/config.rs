use js_sys::Reflect;
use wasm_bindgen::prelude::*;

use crate::errors::ConfigError;

/// Version-pinned CDN directory serving the sql.js loader and its assets.
pub const DEFAULT_ASSET_BASE: &str = "https://cdn.jsdelivr.net/npm/sql.js@1.8.0/dist/";
pub const DEFAULT_LOADER_SCRIPT: &str = "sql-wasm.js";

pub(crate) const ASSET_BASE_GLOBAL: &str = "__SQLJS_ASSET_BASE";
pub(crate) const LOADER_SCRIPT_GLOBAL: &str = "__SQLJS_LOADER_SCRIPT";

/// Where the worker fetches the SQL engine from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    asset_base: String,
    loader_script: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        BootstrapConfig {
            asset_base: DEFAULT_ASSET_BASE.to_string(),
            loader_script: DEFAULT_LOADER_SCRIPT.to_string(),
        }
    }
}

impl BootstrapConfig {
    pub fn new(asset_base: &str, loader_script: &str) -> Result<Self, ConfigError> {
        let base = asset_base.trim();
        if base.is_empty() {
            return Err(ConfigError::EmptyAssetBase);
        }
        let loader_script = loader_script.trim();
        if loader_script.is_empty() {
            return Err(ConfigError::EmptyLoaderScript);
        }
        Ok(BootstrapConfig {
            asset_base: format!("{}/", base.trim_end_matches('/')),
            loader_script: loader_script.to_string(),
        })
    }

    /// Applies optional overrides on top of the pinned defaults.
    pub fn with_overrides(
        asset_base: Option<&str>,
        loader_script: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            asset_base.unwrap_or(DEFAULT_ASSET_BASE),
            loader_script.unwrap_or(DEFAULT_LOADER_SCRIPT),
        )
    }

    /// Reads overrides injected into the worker global scope by the
    /// bootstrap script. Undefined globals fall back to the defaults.
    pub fn from_global() -> Result<Self, ConfigError> {
        let global = js_sys::global();
        let asset_base = read_global_string(&global, ASSET_BASE_GLOBAL)?;
        let loader_script = read_global_string(&global, LOADER_SCRIPT_GLOBAL)?;
        Self::with_overrides(asset_base.as_deref(), loader_script.as_deref())
    }

    pub fn asset_base(&self) -> &str {
        &self.asset_base
    }

    pub fn loader_script(&self) -> &str {
        &self.loader_script
    }

    pub fn loader_url(&self) -> String {
        self.locate_file(&self.loader_script)
    }

    /// Resolves an asset requested by the engine at load time. The file
    /// name is appended as given.
    pub fn locate_file(&self, file: &str) -> String {
        format!("{}{}", self.asset_base, file)
    }
}

fn read_global_string(global: &JsValue, key: &str) -> Result<Option<String>, ConfigError> {
    let value = Reflect::get(global, &JsValue::from_str(key))
        .map_err(|_| ConfigError::Unreadable(key.to_string()))?;
    if value.is_undefined() {
        return Ok(None);
    }
    value
        .as_string()
        .map(Some)
        .ok_or_else(|| ConfigError::NotAString(key.to_string()))
}
