use crate::config::{BootstrapConfig, ASSET_BASE_GLOBAL, LOADER_SCRIPT_GLOBAL};
use crate::errors::BootstrapError;

const WORKER_BODY: &str = r#"(function () {
  var pending = [];
  self.onmessage = function (event) { pending.push(event); };

  function fail(error) {
    var reason = error && error.message ? error.message : String(error);
    var reply = function (event) {
      if (event.data && event.data.type === 'init') {
        self.postMessage({ type: 'error', error: reason });
      }
    };
    self.onmessage = reply;
    pending.splice(0).forEach(reply);
  }

  try {
    importScripts(__GLUE_URL__);
  } catch (error) {
    fail(error);
    return;
  }

  wasm_bindgen({ module_or_path: __WASM_URL__ })
    .then(function () {
      wasm_bindgen.worker_main();
      var handler = self.onmessage;
      pending.splice(0).forEach(function (event) { handler.call(self, event); });
    })
    .catch(fail);
})();
"#;

/// Generate the worker script that starts this module from a blob. The
/// asset overrides are injected into the worker global scope so
/// `worker_main` can read them during startup, and requests that arrive
/// before the module is running are replayed once it is.
pub fn generate_bootstrap_script(
    glue_url: &str,
    wasm_url: &str,
    config: &BootstrapConfig,
) -> Result<String, BootstrapError> {
    let prefix = format!(
        "self.{ASSET_BASE_GLOBAL} = {};\nself.{LOADER_SCRIPT_GLOBAL} = {};\n",
        serde_json::to_string(config.asset_base())?,
        serde_json::to_string(config.loader_script())?,
    );
    let body = WORKER_BODY
        .replace("__GLUE_URL__", &serde_json::to_string(glue_url)?)
        .replace("__WASM_URL__", &serde_json::to_string(wasm_url)?);
    Ok(format!("{prefix}{body}"))
}
