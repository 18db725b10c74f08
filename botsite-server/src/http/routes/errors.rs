//! Error views shared by the HTML blueprints

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::http::pages;
use crate::views::{ErrorView, SetupError};

pub const SERVER_ERROR_MESSAGE: &str = "Internal server error. Please try again later!";

/// Client errors (400-499)
pub fn http_4xx() -> Result<ErrorView, SetupError> {
    ErrorView::setup("error_4xx", 400..=499, render_4xx)
}

/// Server errors (500-599)
pub fn http_5xx() -> Result<ErrorView, SetupError> {
    ErrorView::setup("error_5xx", 500..=599, render_5xx)
}

fn render_4xx(status: StatusCode) -> Response {
    let message = match status {
        StatusCode::BAD_REQUEST => "The request could not be understood.",
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            "You don't have permission to access this page."
        }
        StatusCode::NOT_FOUND => "We're sorry, but we couldn't find the page you're looking for.",
        StatusCode::METHOD_NOT_ALLOWED => "This page doesn't support that request method.",
        StatusCode::REQUEST_TIMEOUT => "The request took too long.",
        _ => "Something went wrong with your request.",
    };
    let title = status.canonical_reason().unwrap_or("Client Error");

    (status, Html(pages::error(status.as_u16(), title, message))).into_response()
}

fn render_5xx(status: StatusCode) -> Response {
    let title = status.canonical_reason().unwrap_or("Server Error");
    (
        status,
        Html(pages::error(status.as_u16(), title, SERVER_ERROR_MESSAGE)),
    )
        .into_response()
}
