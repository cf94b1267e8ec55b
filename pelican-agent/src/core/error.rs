//! Errors for the local callback API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::response::LabelResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("label not found")]
    NotFound,

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Internal(err) => {
                // Log internal details, don't leak them
                tracing::error!(error = ?err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(LabelResponse::error(message))).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, ServerError>;
