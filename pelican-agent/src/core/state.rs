//! Application state

use std::sync::Arc;

use pelican_printer::Dispatcher;

use crate::client::FeedClient;
use crate::core::config::Config;
use crate::labels::{AssetCatalog, LabelRenderer, LabelService, LabelStorage, StorageError};

/// Shared state for the routes and the poll loop.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: LabelService,
    pub feed: FeedClient,
}

impl AppState {
    /// Build the full pipeline from configuration.
    ///
    /// Dispatcher selection happens here, once, by host-capability
    /// detection.
    pub fn initialize(config: &Config) -> Result<Self, StorageError> {
        let renderer = LabelRenderer::new(AssetCatalog::new(&config.assets_dir));
        let storage = LabelStorage::open(&config.output_dir)?;
        let dispatcher = Dispatcher::detect();
        let feed = FeedClient::new(&config.api_url, &config.api_token);

        Ok(Self {
            config: Arc::new(config.clone()),
            service: LabelService::new(renderer, storage, dispatcher),
            feed,
        })
    }
}
