//! Public landing page views

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use super::errors;
use crate::http::{pages, Subdomain};
use crate::state::AppState;
use crate::views::{Blueprint, RouteView, SetupError};

/// Views on the bare host
pub fn blueprint() -> Result<Blueprint, SetupError> {
    Blueprint::pages(Subdomain::Main)
        .register(RouteView::setup("index", "/", get(index))?)?
        .register(RouteView::setup("invite", "/invite", get(invite))?)?
        .register(RouteView::setup("datadog", "/datadog", get(datadog))?)?
        .register_error(errors::http_4xx()?)?
        .register_error(errors::http_5xx()?)
}

/// 302 Found, as browsers and the bot's link previews expect
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_owned())]).into_response()
}

/// GET /
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::index(&state.config.invite_url))
}

/// GET /invite - redirect to the Discord invite
async fn invite(State(state): State<Arc<AppState>>) -> Response {
    found(&state.config.invite_url)
}

/// GET /datadog - redirect to the public status dashboard
async fn datadog(State(state): State<Arc<AppState>>) -> Response {
    found(&state.config.datadog_url)
}
