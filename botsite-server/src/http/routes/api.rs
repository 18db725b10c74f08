//! API subdomain blueprint

use axum::routing::{get, post};

use super::{asana, health, tags, users};
use crate::db::Table;
use crate::http::Subdomain;
use crate::views::{Blueprint, RouteView, SetupError};

pub fn blueprint() -> Result<Blueprint, SetupError> {
    Blueprint::api(Subdomain::Api)
        .register(RouteView::setup("healthcheck", "/healthcheck", get(health::healthcheck))?)?
        .register(
            RouteView::setup("tag", "/tag", get(tags::get_tags).post(tags::post_tag))?
                .bind_table(Table::Tags.name())?,
        )?
        .register(
            RouteView::setup("user", "/user", post(users::post_users))?
                .bind_table(Table::Users.name())?,
        )?
        .register(
            // Asana retries anything but a 200, so a relay is never cut short
            RouteView::setup("asana", "/asana/{asana_key}", post(asana::asana_hook))?
                .without_timeout(),
        )
}
