use log::{debug, info, warn};
use wasm_bindgen::prelude::*;

use crate::config::BootstrapConfig;
use crate::engine::EngineLoader;
use crate::errors::{BootstrapError, ConfigError};
use crate::messages::{HostMessage, WorkerMessage};
use crate::responder::Responder;

/// Answers `init` requests by loading the SQL engine and reporting the
/// outcome. Each request triggers its own load attempt.
pub struct Bootstrapper<L, R> {
    loader: L,
    responder: R,
    config: Result<BootstrapConfig, ConfigError>,
}

impl<L: EngineLoader, R: Responder> Bootstrapper<L, R> {
    pub fn new(loader: L, responder: R, config: Result<BootstrapConfig, ConfigError>) -> Self {
        Bootstrapper {
            loader,
            responder,
            config,
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn responder(&self) -> &R {
        &self.responder
    }

    /// Handles one inbound message. Returns the reply that was posted, or
    /// `None` when the message was not a recognized request.
    pub async fn handle_message(&self, data: JsValue) -> Option<WorkerMessage> {
        let Some(request) = HostMessage::from_js(&data) else {
            debug!("Ignoring unrecognized message: {data:?}");
            return None;
        };

        let reply = match request {
            HostMessage::Init => self.bootstrap().await,
        };

        if let Err(err) = self.responder.post(&reply) {
            warn!("Failed to post {reply:?} to host: {err}");
        }
        Some(reply)
    }

    /// Runs one initialization attempt. Every failure collapses into an
    /// error reply carrying its description.
    pub async fn bootstrap(&self) -> WorkerMessage {
        info!("Initializing SQL engine");
        match self.try_bootstrap().await {
            Ok(()) => {
                info!("SQL engine ready");
                WorkerMessage::Ready
            }
            Err(err) => {
                warn!("SQL engine initialization failed: {err}");
                WorkerMessage::Error {
                    error: err.reason(),
                }
            }
        }
    }

    async fn try_bootstrap(&self) -> Result<(), BootstrapError> {
        let config = self.config.as_ref().map_err(|e| e.clone())?;
        self.loader.initialize(config).await
    }
}
