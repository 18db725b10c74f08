//! Tag endpoints used by the bot's tag command

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiKey};
use crate::models::{Tag, TagName, TagPayload};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TagQuery {
    pub tag_name: Option<String>,
}

/// One entry of the tag listing
#[derive(Serialize)]
pub struct TagSummary {
    pub tag_name: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// GET /tag - list tag names, or fetch one with `?tag_name=`
///
/// An unknown or invalid name yields `{}`.
pub async fn get_tags(
    _key: ApiKey,
    State(state): State<Arc<AppState>>,
    Query(query): Query<TagQuery>,
) -> Result<Response, ApiError> {
    let requested = query.tag_name.filter(|name| !name.trim().is_empty());

    match requested {
        Some(name) => {
            // A name that could never be stored is simply unknown
            let tag = match TagName::new(&name) {
                Ok(name) => state.store.get_tag(&name).await?,
                Err(_) => None,
            };
            Ok(match tag {
                Some(tag) => Json(tag).into_response(),
                None => Json(json!({})).into_response(),
            })
        }
        None => {
            let names = state.store.list_tag_names().await?;
            let listing: Vec<TagSummary> = names
                .into_iter()
                .map(|tag_name| TagSummary { tag_name })
                .collect();
            Ok(Json(listing).into_response())
        }
    }
}

/// POST /tag - create or replace a tag
pub async fn post_tag(
    _key: ApiKey,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<TagPayload>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let tag = Tag::try_from(payload)?;
    state.store.upsert_tag(&tag).await?;

    tracing::info!(tag_name = %tag.tag_name, "tag saved");
    Ok(Json(SuccessResponse { success: true }))
}
