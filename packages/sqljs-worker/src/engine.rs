use js_sys::{Function, Object, Promise, Reflect};
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::config::BootstrapConfig;
use crate::errors::BootstrapError;

pub const DEFAULT_ENTRY_POINT: &str = "initSqlJs";

/// Loads and initializes an external SQL engine.
#[allow(async_fn_in_trait)]
pub trait EngineLoader {
    async fn initialize(&self, config: &BootstrapConfig) -> Result<(), BootstrapError>;
}

/// Loads sql.js through `importScripts` and calls its global init function.
#[derive(Debug, Clone)]
pub struct SqlJsLoader {
    entry_point: String,
}

impl Default for SqlJsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlJsLoader {
    pub fn new() -> Self {
        Self::with_entry_point(DEFAULT_ENTRY_POINT)
    }

    pub fn with_entry_point(entry_point: &str) -> Self {
        SqlJsLoader {
            entry_point: entry_point.to_string(),
        }
    }

    fn import_loader_script(&self, url: &str) -> Result<(), BootstrapError> {
        let global = js_sys::global();
        let import_scripts = Reflect::get(&global, &JsValue::from_str("importScripts"))?
            .dyn_into::<Function>()
            .map_err(|_| BootstrapError::NotInWorker)?;
        debug!("Importing SQL engine loader from {url}");
        import_scripts.call1(&global, &JsValue::from_str(url))?;
        Ok(())
    }

    /// Calls the engine's init function with a `locateFile` callback bound to
    /// `config` and waits for it to settle. The resolved engine is dropped.
    pub(crate) async fn invoke_entry_point(
        &self,
        config: &BootstrapConfig,
    ) -> Result<(), BootstrapError> {
        let global = js_sys::global();
        let init = Reflect::get(&global, &JsValue::from_str(&self.entry_point))?
            .dyn_into::<Function>()
            .map_err(|_| BootstrapError::LoaderUnavailable(self.entry_point.clone()))?;

        let asset_config = config.clone();
        let locate_file = Closure::<dyn Fn(String) -> String>::new(move |file: String| {
            asset_config.locate_file(&file)
        });
        let options = Object::new();
        Reflect::set(
            &options,
            &JsValue::from_str("locateFile"),
            locate_file.as_ref(),
        )?;

        let pending = init.call1(&JsValue::NULL, &options)?;
        // The callback must outlive the await; the engine may ask for
        // assets at any point before it settles.
        let _engine = JsFuture::from(Promise::resolve(&pending)).await?;
        drop(locate_file);
        Ok(())
    }
}

impl EngineLoader for SqlJsLoader {
    async fn initialize(&self, config: &BootstrapConfig) -> Result<(), BootstrapError> {
        self.import_loader_script(&config.loader_url())?;
        self.invoke_entry_point(config).await
    }
}

#[cfg(all(test, target_family = "wasm"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn install_entry_point(name: &str, body: &str) {
        let function = Function::new_with_args("options", body);
        Reflect::set(&js_sys::global(), &JsValue::from_str(name), &function).unwrap();
    }

    fn read_global(name: &str) -> JsValue {
        Reflect::get(&js_sys::global(), &JsValue::from_str(name)).unwrap()
    }

    #[wasm_bindgen_test(async)]
    async fn test_missing_entry_point_is_unavailable() {
        let loader = SqlJsLoader::with_entry_point("__sqljsTestMissingEntry");
        let err = loader
            .invoke_entry_point(&BootstrapConfig::default())
            .await
            .expect_err("missing entry point should fail");
        assert!(matches!(err, BootstrapError::LoaderUnavailable(name) if name == "__sqljsTestMissingEntry"));
    }

    #[wasm_bindgen_test(async)]
    async fn test_entry_point_receives_locate_file() {
        install_entry_point(
            "__sqljsTestResolvingEntry",
            "self.__sqljsTestLocated = options.locateFile('sql-wasm.wasm'); \
             return Promise.resolve({ Database: function () {} });",
        );
        let loader = SqlJsLoader::with_entry_point("__sqljsTestResolvingEntry");
        loader
            .invoke_entry_point(&BootstrapConfig::default())
            .await
            .expect("resolving entry point should succeed");

        assert_eq!(
            read_global("__sqljsTestLocated").as_string().as_deref(),
            Some("https://cdn.jsdelivr.net/npm/sql.js@1.8.0/dist/sql-wasm.wasm")
        );
    }

    #[wasm_bindgen_test(async)]
    async fn test_locate_file_uses_configured_base() {
        install_entry_point(
            "__sqljsTestMirrorEntry",
            "return new Promise(function (resolve) { \
               setTimeout(function () { \
                 self.__sqljsTestMirrorLocated = options.locateFile('side file.data'); \
                 resolve({}); \
               }, 0); \
             });",
        );
        let config = BootstrapConfig::new("https://mirror.test/sqljs", "sql-wasm.js").unwrap();
        let loader = SqlJsLoader::with_entry_point("__sqljsTestMirrorEntry");
        loader.invoke_entry_point(&config).await.unwrap();

        assert_eq!(
            read_global("__sqljsTestMirrorLocated").as_string().as_deref(),
            Some("https://mirror.test/sqljs/side file.data")
        );
    }

    #[wasm_bindgen_test(async)]
    async fn test_rejection_reports_error_message() {
        install_entry_point(
            "__sqljsTestRejectingEntry",
            "return Promise.reject(new Error('boom'));",
        );
        let loader = SqlJsLoader::with_entry_point("__sqljsTestRejectingEntry");
        let err = loader
            .invoke_entry_point(&BootstrapConfig::default())
            .await
            .expect_err("rejecting entry point should fail");
        assert_eq!(err.reason(), "boom");
    }

    #[wasm_bindgen_test(async)]
    async fn test_synchronous_throw_is_caught() {
        install_entry_point(
            "__sqljsTestThrowingEntry",
            "throw new TypeError('bad wasm');",
        );
        let loader = SqlJsLoader::with_entry_point("__sqljsTestThrowingEntry");
        let err = loader
            .invoke_entry_point(&BootstrapConfig::default())
            .await
            .expect_err("throwing entry point should fail");
        assert_eq!(err.reason(), "bad wasm");
    }

    #[wasm_bindgen_test(async)]
    async fn test_initialize_outside_worker_fails_without_panicking() {
        // Browser tests run on the main thread, where importScripts is absent.
        let err = SqlJsLoader::new()
            .initialize(&BootstrapConfig::default())
            .await
            .expect_err("importScripts is unavailable on the main thread");
        assert!(matches!(err, BootstrapError::NotInWorker));
    }
}
