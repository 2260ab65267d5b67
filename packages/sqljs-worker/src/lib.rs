//! Web worker that loads the sql.js engine from a version-pinned CDN and
//! answers the host's `init` request with `ready` or `error`.

use wasm_bindgen::prelude::*;

mod bootstrap;
mod config;
mod engine;
mod errors;
mod messages;
mod responder;
mod utils;
mod worker;
mod worker_template;

pub use bootstrap::Bootstrapper;
pub use config::{BootstrapConfig, DEFAULT_ASSET_BASE, DEFAULT_LOADER_SCRIPT};
pub use engine::{EngineLoader, SqlJsLoader, DEFAULT_ENTRY_POINT};
pub use errors::{BootstrapError, ConfigError};
pub use messages::{HostMessage, WorkerMessage};
pub use responder::{Responder, WorkerScopeResponder};
pub use worker::WorkerBootstrapper;
pub use worker_template::generate_bootstrap_script;

// Export the worker entry point
#[wasm_bindgen]
pub fn worker_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    console_log::init_with_level(log::Level::Info).ok();

    worker::main().map_err(|err| {
        log::error!("Worker failed to start: {err}");
        JsValue::from(err)
    })
}

/// Build the script a host page turns into a worker blob. `asset_base` and
/// `loader_script` override the pinned CDN location when given.
#[wasm_bindgen(js_name = "bootstrapScript")]
pub fn bootstrap_script(
    glue_url: &str,
    wasm_url: &str,
    asset_base: Option<String>,
    loader_script: Option<String>,
) -> Result<String, JsValue> {
    let config = BootstrapConfig::with_overrides(asset_base.as_deref(), loader_script.as_deref())
        .map_err(BootstrapError::from)?;
    Ok(generate_bootstrap_script(glue_url, wasm_url, &config)?)
}
