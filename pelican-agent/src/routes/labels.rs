//! Label routes: artifact serving and manual reprint

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use shared::models::Order;
use shared::response::LabelResponse;
use tracing::info;

use crate::core::error::{Result, ServerError};
use crate::core::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/print-label", post(print_label))
        .route("/{filename}", get(serve_label))
}

/// Serve a previously rendered artifact by basename.
async fn serve_label(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let path = state
        .service
        .storage()
        .lookup(&filename)
        .ok_or(ServerError::NotFound)?;

    let html = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ServerError::Internal(e.into()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response())
}

/// On-demand render + dispatch outside the poll cycle, for manual
/// reprints. Malformed bodies come back as a structured error instead
/// of crashing the listener.
async fn print_label(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Order>, JsonRejection>,
) -> Result<Json<LabelResponse>> {
    let Json(order) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let processed = state
        .service
        .process(&order)
        .await
        .map_err(|e| ServerError::Internal(e.into()))?;

    let how = if processed.outcome.is_auto() {
        "sent to printer"
    } else {
        "opened for manual printing"
    };
    info!(order_id = order.id, how, "Manual reprint dispatched");

    Ok(Json(LabelResponse::ok(format!(
        "Order #{} label {}",
        order.id, how
    ))))
}
