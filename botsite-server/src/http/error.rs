//! API error types with IntoResponse
//!
//! Errors on the API subdomain become `{"error_code", "error_message"}`
//! bodies with a matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DbError;
use crate::models::ValidationError;

/// Numeric error codes understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    UnknownRoute = 0,
    Unauthorized = 1,
    InvalidApiKey = 2,
    IncorrectParameters = 3,
    BadDataFormat = 4,
    Internal = 5,
    Timeout = 6,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownRoute => "Unknown API route",
            Self::Unauthorized => "Unauthorized",
            Self::InvalidApiKey => "Invalid API-key",
            Self::IncorrectParameters => "Incorrect parameters provided",
            Self::BadDataFormat => "Input data in incorrect format",
            Self::Internal => "Internal server error",
            Self::Timeout => "Request timed out",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownRoute => StatusCode::NOT_FOUND,
            Self::Unauthorized | Self::InvalidApiKey => StatusCode::UNAUTHORIZED,
            Self::IncorrectParameters | Self::BadDataFormat => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error_code: u8,
    error_message: &'static str,
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// No view matches the path (404)
    UnknownRoute,

    /// Webhook path key mismatch (401)
    Unauthorized,

    /// Missing or wrong `X-API-Key` (401)
    InvalidApiKey,

    /// Payload parsed but failed validation (400)
    IncorrectParameters(ValidationError),

    /// Payload is not the JSON we expect (400)
    BadDataFormat { reason: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500, logged)
    Internal { message: String },

    /// Handler ran past the request timeout (408)
    Timeout,
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownRoute => ErrorCode::UnknownRoute,
            Self::Unauthorized => ErrorCode::Unauthorized,
            Self::InvalidApiKey => ErrorCode::InvalidApiKey,
            Self::IncorrectParameters(_) => ErrorCode::IncorrectParameters,
            Self::BadDataFormat { .. } => ErrorCode::BadDataFormat,
            Self::Database(_) | Self::Internal { .. } => ErrorCode::Internal,
            Self::Timeout => ErrorCode::Timeout,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::IncorrectParameters(e) => tracing::debug!("Rejected parameters: {}", e),
            Self::BadDataFormat { reason } => tracing::debug!("Rejected body: {}", reason),
            // Log the actual error, return generic message
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::Internal { message } => tracing::error!("Internal error: {}", message),
            Self::Timeout => tracing::warn!("Request timed out"),
            _ => {}
        }

        let code = self.code();
        let body = ErrorBody {
            error_code: code as u8,
            error_message: code.message(),
        };

        (code.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::IncorrectParameters(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = ApiError::UnknownRoute.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"error_code": 0, "error_message": "Unknown API route"})
        );
    }

    #[tokio::test]
    async fn unauthorized_and_invalid_key_are_401() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error_code"], 1);

        let response = ApiError::InvalidApiKey.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error_message"], "Invalid API-key");
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err: ApiError = ValidationError::Empty { field: "tag_name" }.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error_code": 3, "error_message": "Incorrect parameters provided"})
        );
    }

    #[tokio::test]
    async fn bad_data_format_is_400() {
        let response = ApiError::BadDataFormat {
            reason: "expected value".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error_code"], 4);
    }

    #[tokio::test]
    async fn timeout_is_408_with_code() {
        let response = ApiError::Timeout.into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            body_json(response).await,
            json!({"error_code": 6, "error_message": "Request timed out"})
        );
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal {
            message: "secret detail".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error_message"], "Internal server error");
    }
}
