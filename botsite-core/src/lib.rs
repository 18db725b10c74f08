//! botsite-core: configuration and error types shared by the server and CLI.

pub mod config;
pub mod error;

pub use config::{LogLevel, SiteConfig};
pub use error::{CoreError, Result};
