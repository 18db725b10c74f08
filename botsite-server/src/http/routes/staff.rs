//! Staff subdomain views

use axum::response::Html;
use axum::routing::get;

use super::errors;
use crate::http::{pages, Subdomain};
use crate::views::{Blueprint, RouteView, SetupError};

pub fn blueprint() -> Result<Blueprint, SetupError> {
    Blueprint::pages(Subdomain::Staff)
        .register(RouteView::setup("staff.index", "/", get(index))?)?
        .register_error(errors::http_4xx()?)?
        .register_error(errors::http_5xx()?)
}

/// GET /
pub async fn index() -> Html<String> {
    Html(pages::staff_index())
}
