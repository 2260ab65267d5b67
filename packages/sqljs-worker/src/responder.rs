use web_sys::DedicatedWorkerGlobalScope;

use crate::errors::BootstrapError;
use crate::messages::WorkerMessage;

/// Sends replies back to whoever created the worker.
pub trait Responder {
    fn post(&self, message: &WorkerMessage) -> Result<(), BootstrapError>;
}

pub struct WorkerScopeResponder {
    scope: DedicatedWorkerGlobalScope,
}

impl WorkerScopeResponder {
    pub fn new(scope: DedicatedWorkerGlobalScope) -> Self {
        WorkerScopeResponder { scope }
    }
}

impl Responder for WorkerScopeResponder {
    fn post(&self, message: &WorkerMessage) -> Result<(), BootstrapError> {
        let value = message.to_js()?;
        self.scope.post_message(&value)?;
        Ok(())
    }
}
