//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;
use crate::state::AppState;

/// Header the bot authenticates with
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Proof that the request carried the configured bot API key.
///
/// Rejects with `invalid_api_key` when the header is missing, differs from
/// `BOT_API_KEY`, or the server has no key configured.
pub struct ApiKey;

impl FromRequestParts<Arc<AppState>> for ApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.bot_api_key.as_deref() else {
            tracing::warn!("API request rejected: BOT_API_KEY is not configured");
            return Err(ApiError::InvalidApiKey);
        };

        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        match provided {
            Some(key) if key == expected => Ok(Self),
            _ => Err(ApiError::InvalidApiKey),
        }
    }
}

/// `Json` whose rejections use the API's `bad_data_format` error
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadDataFormat {
                reason: rejection.body_text(),
            }),
        }
    }
}
