//! Error types for the dispatch library

use thiserror::Error;

/// Dispatch error types
///
/// These stay internal to the strategy chain: a failed strategy falls
/// through to the next one, and [`crate::LabelDispatch::dispatch`] itself
/// never surfaces an error to the caller.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// IO error while spawning or talking to an external tool
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External tool exited with a failure status
    #[error("Tool failed: {0}")]
    ToolFailed(String),

    /// Timeout waiting for an external tool
    #[error("Timeout: {0}")]
    Timeout(String),

    /// PDF generation produced no usable output
    #[error("PDF generation failed: {0}")]
    PdfGeneration(String),
}

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;
