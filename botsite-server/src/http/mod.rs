//! HTTP server layer
//!
//! Axum server with:
//! - Subdomain dispatch by `Host` header
//! - Request tracing and timeouts
//! - Graceful shutdown
//! - JSON error responses on the API subdomain, HTML error pages elsewhere

pub mod error;
pub mod extractors;
pub mod pages;
pub mod routes;
pub mod server;
pub mod subdomain;

pub use error::{ApiError, ErrorCode};
pub use server::{build_app, run_server, ServerError};
pub use subdomain::Subdomain;
