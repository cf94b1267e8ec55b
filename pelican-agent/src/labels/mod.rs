//! Label rendering and dispatch pipeline
//!
//! Everything between a decoded [`shared::Order`] and paper: inline
//! assets, derived visual codes, the HTML renderer, artifact storage,
//! and the service that strings them together with the dispatch chain.

pub mod assets;
pub mod codes;
pub mod renderer;
pub mod service;
pub mod storage;

pub use assets::AssetCatalog;
pub use codes::CheckboxGlyphs;
pub use renderer::LabelRenderer;
pub use service::{LabelService, ProcessedLabel, ServiceError, ServiceResult};
pub use storage::{LabelStorage, StorageError, StorageResult};
