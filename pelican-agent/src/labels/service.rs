//! Label service - render, persist, dispatch
//!
//! One entry point used by both the poll loop and the manual reprint
//! endpoint. Rendering is infallible and dispatch only degrades, so the
//! sole failure mode is persisting the artifact.

use std::path::PathBuf;

use pelican_printer::{DispatchOutcome, Dispatcher, LabelDispatch};
use shared::models::Order;
use thiserror::Error;
use tracing::{info, instrument};

use super::renderer::LabelRenderer;
use super::storage::{LabelStorage, StorageError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result of one processed label.
#[derive(Debug, Clone)]
pub struct ProcessedLabel {
    pub artifact: PathBuf,
    pub outcome: DispatchOutcome,
}

/// Render → persist → dispatch pipeline
#[derive(Clone)]
pub struct LabelService {
    renderer: LabelRenderer,
    storage: LabelStorage,
    dispatcher: Dispatcher,
}

impl LabelService {
    pub fn new(renderer: LabelRenderer, storage: LabelStorage, dispatcher: Dispatcher) -> Self {
        Self {
            renderer,
            storage,
            dispatcher,
        }
    }

    /// Process one order end to end.
    #[instrument(skip(self, order), fields(order_id = order.id))]
    pub async fn process(&self, order: &Order) -> ServiceResult<ProcessedLabel> {
        let html = self.renderer.render(order);
        let artifact = self.storage.persist(order.id, &html)?;
        let outcome = self.dispatcher.dispatch(&artifact).await;

        info!(
            artifact = %artifact.display(),
            auto = outcome.is_auto(),
            "Label dispatched"
        );

        Ok(ProcessedLabel { artifact, outcome })
    }

    pub fn storage(&self) -> &LabelStorage {
        &self.storage
    }
}
