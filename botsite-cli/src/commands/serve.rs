//! HTTP server command
//!
//! Serves the main, staff and API subdomains from one listener.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use botsite_core::SiteConfig;
use botsite_server::db::{MemoryStore, PgStore, SiteStore};
use botsite_server::run_server;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: BIND_ADDR or 127.0.0.1:8080)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides DATABASE_URL from the environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Keep tags and users in memory instead of Postgres (lost on exit)
    #[arg(long, conflicts_with = "database_url")]
    pub in_memory: bool,
}

/// Run the HTTP server until Ctrl+C or SIGTERM
pub async fn run_serve(args: ServeArgs, mut config: SiteConfig) -> Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(url) = args.database_url {
        config.database_url = Some(url);
    }

    let store: Arc<dyn SiteStore> = if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let database_url = config
            .require_database_url()
            .context("Set DATABASE_URL, pass --database-url, or use --in-memory")?;
        let store = PgStore::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Arc::new(store)
    };

    tracing::info!("Starting botsite on {}", config.bind_addr);

    run_server(Arc::new(config), store)
        .await
        .context("Server error")?;

    Ok(())
}
