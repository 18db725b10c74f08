//! Blueprints: the set of views mounted on one subdomain

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use super::{ErrorView, RouteInfo, RouteView, SetupError};
use crate::http::error::ApiError;
use crate::http::Subdomain;
use crate::state::AppState;

/// How unmatched routes and failures are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorStyle {
    /// JSON error bodies with API error codes
    Json,
    /// HTML pages rendered by the blueprint's error views
    Html,
}

/// Views and error views for one subdomain
pub struct Blueprint {
    subdomain: Subdomain,
    style: ErrorStyle,
    views: Vec<RouteView>,
    error_views: Vec<ErrorView>,
}

impl Blueprint {
    /// Blueprint serving HTML pages
    pub fn pages(subdomain: Subdomain) -> Self {
        Self {
            subdomain,
            style: ErrorStyle::Html,
            views: Vec::new(),
            error_views: Vec::new(),
        }
    }

    /// Blueprint serving the JSON API
    pub fn api(subdomain: Subdomain) -> Self {
        Self {
            subdomain,
            style: ErrorStyle::Json,
            views: Vec::new(),
            error_views: Vec::new(),
        }
    }

    pub fn subdomain(&self) -> Subdomain {
        self.subdomain
    }

    /// Add a view; names and paths must be unique within the blueprint
    pub fn register(mut self, view: RouteView) -> Result<Self, SetupError> {
        for existing in &self.views {
            if existing.name() == view.name() {
                return Err(SetupError::DuplicateName {
                    name: view.name().to_owned(),
                    subdomain: self.subdomain,
                });
            }
            if existing.path() == view.path() {
                return Err(SetupError::DuplicatePath {
                    path: view.path().to_owned(),
                    subdomain: self.subdomain,
                });
            }
        }

        self.views.push(view);
        Ok(self)
    }

    /// Add an error view; status ranges must not overlap
    pub fn register_error(mut self, view: ErrorView) -> Result<Self, SetupError> {
        if let Some(existing) = self.error_views.iter().find(|e| e.overlaps(&view)) {
            return Err(SetupError::OverlappingErrorViews {
                first: existing.name().to_owned(),
                second: view.name().to_owned(),
            });
        }

        self.error_views.push(view);
        Ok(self)
    }

    pub fn routes(&self) -> Vec<RouteInfo> {
        self.views
            .iter()
            .map(|view| RouteInfo {
                subdomain: self.subdomain,
                name: view.name(),
                path: view.path(),
                table: view.binding().map(|b| b.table().name()),
                timed: view.is_timed(),
            })
            .collect()
    }

    /// Build the axum router for this subdomain.
    ///
    /// Timed views answer with a bare 408 once `request_timeout` elapses;
    /// the error style then renders it like any other error status.
    pub fn into_router(self, state: Arc<AppState>) -> Router {
        let timeout = TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout,
        );

        let mut router: Router<Arc<AppState>> = Router::new();
        for view in self.views {
            let (path, timed, handler) = view.into_parts();
            let handler = if timed {
                handler.layer(timeout.clone())
            } else {
                handler
            };
            router = router.route(path, handler);
        }

        match self.style {
            ErrorStyle::Json => {
                let cors = CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any);

                router
                    .fallback(unknown_api_route)
                    .layer(CatchPanicLayer::custom(api_panic))
                    .layer(middleware::map_response(render_api_timeout))
                    .layer(cors)
                    .with_state(state)
            }
            ErrorStyle::Html => {
                let error_views = Arc::new(self.error_views);

                router
                    .fallback(page_not_found)
                    .layer(CatchPanicLayer::custom(page_panic))
                    .layer(middleware::map_response_with_state(
                        error_views,
                        render_error_page,
                    ))
                    .with_state(state)
            }
        }
    }
}

async fn unknown_api_route() -> ApiError {
    ApiError::UnknownRoute
}

async fn page_not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Give bare timeout responses the API's JSON error body
async fn render_api_timeout(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(CONTENT_TYPE)
    {
        return ApiError::Timeout.into_response();
    }
    response
}

fn api_panic(_: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    ApiError::Internal {
        message: "handler panicked".into(),
    }
    .into_response()
}

fn page_panic(_: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// Replace bare error statuses with the matching error view's page.
///
/// Responses that already carry a body type are left alone; headers such
/// as `Allow` on a 405 are kept.
async fn render_error_page(
    State(error_views): State<Arc<Vec<ErrorView>>>,
    response: Response,
) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error())
        || response.headers().contains_key(CONTENT_TYPE)
    {
        return response;
    }

    let Some(view) = error_views.iter().find(|view| view.handles(status)) else {
        return response;
    };

    let (parts, _) = response.into_parts();
    let mut rendered = view.render(status);
    for (name, value) in parts.headers.iter() {
        if *name != CONTENT_LENGTH && !rendered.headers().contains_key(name) {
            rendered.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rendered
}
