//! Asana webhook endpoint

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::error::ApiError;
use crate::relay::AsanaDelivery;
use crate::state::AppState;

/// Handshake header sent once when Asana creates the webhook
pub const HOOK_SECRET_HEADER: &str = "X-Hook-Secret";

/// POST /asana/{asana_key}
///
/// Handshake requests are confirmed by echoing `X-Hook-Secret`. Event
/// deliveries are relayed to the chat webhook and always answered with an
/// empty 200 so Asana does not retry.
pub async fn asana_hook(
    State(state): State<Arc<AppState>>,
    Path(asana_key): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    match state.config.asana.key.as_deref() {
        Some(expected) if expected == asana_key => {}
        _ => return Err(ApiError::Unauthorized),
    }

    if let Some(secret) = headers.get(HOOK_SECRET_HEADER) {
        tracing::info!("confirming asana webhook handshake");
        if let Err(err) = state.asana.confirm_hook().await {
            tracing::error!(error = %err, "failed to announce asana hook");
        }
        return Ok((StatusCode::OK, [(HOOK_SECRET_HEADER, secret.clone())]).into_response());
    }

    let delivery: AsanaDelivery =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadDataFormat {
            reason: e.to_string(),
        })?;

    tracing::info!(events = delivery.events.len(), "relaying asana events");
    state.asana.handle_events(&delivery.events).await;

    Ok(StatusCode::OK.into_response())
}
