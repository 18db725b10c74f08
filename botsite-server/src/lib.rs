//! botsite-server: multi-subdomain website backend
//!
//! Serves the public landing page, the staff subdomain and the JSON API
//! subdomain (tags, user roles, Asana webhook relay) from one listener.
//! Requests are routed by `Host` header to a per-subdomain blueprint.

pub mod db;
pub mod http;
pub mod models;
pub mod relay;
pub mod state;
pub mod views;

pub use http::{build_app, run_server, ServerError};
pub use state::AppState;
pub use views::RouteManager;
