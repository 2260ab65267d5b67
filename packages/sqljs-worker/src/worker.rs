// worker.rs - This module runs in the worker context
use log::{error, info};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DedicatedWorkerGlobalScope, MessageEvent};

use crate::bootstrap::Bootstrapper;
use crate::config::BootstrapConfig;
use crate::engine::SqlJsLoader;
use crate::errors::BootstrapError;
use crate::responder::WorkerScopeResponder;

pub type WorkerBootstrapper = Bootstrapper<SqlJsLoader, WorkerScopeResponder>;

/// Wires the bootstrapper to the worker's inbound message channel.
pub fn main() -> Result<(), BootstrapError> {
    let worker_scope = js_sys::global()
        .dyn_into::<DedicatedWorkerGlobalScope>()
        .map_err(|_| BootstrapError::NotInWorker)?;

    // A bad override must not stop the worker from answering.
    let config = BootstrapConfig::from_global();
    match &config {
        Ok(config) => info!("SQL engine assets resolve against {}", config.asset_base()),
        Err(err) => error!("Invalid worker configuration: {err}"),
    }

    let bootstrapper = Rc::new(Bootstrapper::new(
        SqlJsLoader::new(),
        WorkerScopeResponder::new(worker_scope.clone()),
        config,
    ));
    install_onmessage_handler(&worker_scope, bootstrapper);
    Ok(())
}

fn install_onmessage_handler(
    worker_scope: &DedicatedWorkerGlobalScope,
    bootstrapper: Rc<WorkerBootstrapper>,
) {
    let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
        let bootstrapper = Rc::clone(&bootstrapper);
        spawn_local(async move {
            bootstrapper.handle_message(event.data()).await;
        });
    }) as Box<dyn FnMut(MessageEvent)>);

    worker_scope.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();
}
