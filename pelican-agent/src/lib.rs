//! Pelican print agent
//!
//! Local agent for the delivery counter: polls the order feed for pending
//! print jobs, renders each as a self-contained A6 shipping label, pushes
//! the label through the print dispatch chain, and acknowledges completion
//! back to the feed. A small callback HTTP server exposes rendered labels
//! and an on-demand reprint endpoint for the shop front-end.
//!
//! # Module structure
//!
//! ```text
//! pelican-agent/src/
//! ├── core/      # config, state, errors, poll task
//! ├── client.rs  # remote order feed client
//! ├── labels/    # renderer, visual codes, assets, storage, service
//! ├── routes/    # local callback HTTP API
//! └── logging.rs # tracing setup
//! ```

pub mod client;
pub mod core;
pub mod labels;
pub mod logging;
pub mod routes;

// Re-export public types
pub use client::{ClientError, FeedClient};
pub use core::{AppState, Config, ConfigError};
pub use labels::{LabelRenderer, LabelService, LabelStorage};
