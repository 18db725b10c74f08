//! User role endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiKey};
use crate::models::{parse_user_roles, WriteSummary};
use crate::state::AppState;

/// POST /user - upsert a batch of `{user_id, role}` records
///
/// The body must be a JSON array; anything else is `incorrect_parameters`.
pub async fn post_users(
    _key: ApiKey,
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<WriteSummary>, ApiError> {
    let users = parse_user_roles(body)?;
    let summary = state.store.upsert_users(&users).await?;

    tracing::info!(
        inserted = summary.inserted,
        replaced = summary.replaced,
        unchanged = summary.unchanged,
        "user roles saved"
    );
    Ok(Json(summary))
}
