//! Core: configuration, state, errors, background tasks

pub mod config;
pub mod error;
pub mod state;
pub mod tasks;

pub use config::{Config, ConfigError};
pub use error::{Result, ServerError};
pub use state::AppState;
