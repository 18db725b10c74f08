//! Route manager: builds every blueprint and the subdomain dispatcher

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use botsite_core::SiteConfig;

use super::{Blueprint, RouteInfo, SetupError};
use crate::http::routes;
use crate::http::Subdomain;
use crate::state::AppState;

/// Owns the validated blueprints for the main, staff and API subdomains
pub struct RouteManager {
    config: Arc<SiteConfig>,
    blueprints: Vec<Blueprint>,
}

impl RouteManager {
    /// Declare and validate every view.
    ///
    /// # Errors
    ///
    /// Returns the first [`SetupError`] found in any blueprint.
    pub fn new(config: Arc<SiteConfig>) -> Result<Self, SetupError> {
        let blueprints = vec![
            routes::main_site::blueprint()?,
            routes::staff::blueprint()?,
            routes::api::blueprint()?,
        ];

        if config.secret_key.is_none() {
            tracing::warn!("WEBPAGE_SECRET_KEY is not set");
        }

        Ok(Self { config, blueprints })
    }

    /// Session signing key from `WEBPAGE_SECRET_KEY`
    pub fn secret_key(&self) -> Option<&str> {
        self.config.secret_key.as_deref()
    }

    pub fn server_name(&self) -> &str {
        &self.config.server_name
    }

    /// Every registered view across all subdomains
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.blueprints.iter().flat_map(Blueprint::routes).collect()
    }

    /// Build the top-level router that dispatches by `Host`
    pub fn into_router(self, state: Arc<AppState>) -> Router {
        for route in self.routes() {
            tracing::debug!(
                subdomain = %route.subdomain,
                name = route.name,
                path = route.path,
                table = ?route.table,
                timed = route.timed,
                "registered view"
            );
        }

        let mut sites = SiteRouters {
            server_name: self.config.server_name.clone(),
            main: Router::new(),
            staff: Router::new(),
            api: Router::new(),
        };

        for blueprint in self.blueprints {
            let subdomain = blueprint.subdomain();
            let router = blueprint.into_router(state.clone());
            match subdomain {
                Subdomain::Main => sites.main = router,
                Subdomain::Staff => sites.staff = router,
                Subdomain::Api => sites.api = router,
            }
        }

        Router::new().fallback(dispatch).with_state(Arc::new(sites))
    }
}

struct SiteRouters {
    server_name: String,
    main: Router,
    staff: Router,
    api: Router,
}

impl SiteRouters {
    fn router(&self, subdomain: Subdomain) -> Router {
        match subdomain {
            Subdomain::Main => self.main.clone(),
            Subdomain::Staff => self.staff.clone(),
            Subdomain::Api => self.api.clone(),
        }
    }
}

async fn dispatch(State(sites): State<Arc<SiteRouters>>, request: Request) -> Response {
    let subdomain = Subdomain::from_request(&request, &sites.server_name);
    match sites.router(subdomain).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}
