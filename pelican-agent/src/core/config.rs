//! Agent configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | API_URL | http://localhost:3000/api | Order feed base URL |
//! | API_TOKEN | (required) | Bearer token for the feed |
//! | POLL_INTERVAL_MS | 5000 | Poll interval |
//! | INTER_ORDER_DELAY_MS | 1000 | Delay between orders (API throttling) |
//! | HTTP_PORT | 4617 | Local callback server port |
//! | OUTPUT_DIR | labels | Rendered artifact directory |
//! | ASSETS_DIR | assets | Label image assets directory |
//! | LOG_LEVEL | info | Tracing level filter |
//! | LOG_DIR | (unset) | Optional rolling log file directory |
//!
//! `API_TOKEN` deliberately has no fallback: the agent refuses to start
//! without it instead of silently polling with a baked-in secret.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Agent configuration - everything the poll loop and the local callback
/// server need.
#[derive(Debug, Clone)]
pub struct Config {
    /// Order feed base URL
    pub api_url: String,
    /// Bearer token for the feed (required)
    pub api_token: String,
    /// Poll interval in milliseconds
    pub poll_interval_ms: u64,
    /// Delay between orders within a cycle, throttling feed calls
    pub inter_order_delay_ms: u64,
    /// Local callback server port
    pub http_port: u16,
    /// Directory for rendered artifacts
    pub output_dir: String,
    /// Directory holding the label image assets
    pub assets_dir: String,
    /// Tracing level filter
    pub log_level: Option<String>,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults, except `API_TOKEN` which is
    /// required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = std::env::var("API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar("API_TOKEN"))?;

        Ok(Self {
            api_url: std::env::var("API_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api".into()),
            api_token,
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            inter_order_delay_ms: std::env::var("INTER_ORDER_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4617),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "labels".into()),
            assets_dir: std::env::var("ASSETS_DIR").unwrap_or_else(|_| "assets".into()),
            log_level: std::env::var("LOG_LEVEL").ok(),
            log_dir: std::env::var("LOG_DIR").ok(),
        })
    }

    /// Build a configuration with explicit values, bypassing the
    /// environment. Used by tests.
    pub fn with_overrides(
        api_url: impl Into<String>,
        api_token: impl Into<String>,
        output_dir: impl Into<String>,
        assets_dir: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_token: api_token.into(),
            poll_interval_ms: 5000,
            inter_order_delay_ms: 1000,
            http_port: 4617,
            output_dir: output_dir.into(),
            assets_dir: assets_dir.into(),
            log_level: None,
            log_dir: None,
        }
    }
}
