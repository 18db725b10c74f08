//! Application state shared across handlers

use std::sync::Arc;

use botsite_core::SiteConfig;

use crate::db::SiteStore;
use crate::relay::AsanaRelay;

/// Shared application state
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub store: Arc<dyn SiteStore>,
    pub asana: AsanaRelay,
}

impl AppState {
    /// Assemble state with a fresh outbound HTTP client
    pub fn new(config: Arc<SiteConfig>, store: Arc<dyn SiteStore>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("botsite/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let asana = AsanaRelay::from_config(&config, client);

        Ok(Self {
            config,
            store,
            asana,
        })
    }
}
