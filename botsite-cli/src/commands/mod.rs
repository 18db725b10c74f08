//! Command implementations for the botsite CLI

pub mod config;
pub mod migrate;
pub mod routes;
pub mod serve;

pub use config::run_config;
pub use migrate::run_migrate;
pub use routes::run_routes;
pub use serve::run_serve;
