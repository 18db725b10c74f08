//! Create the site tables without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use botsite_core::SiteConfig;
use botsite_server::db::{create_pool, migrations, Table};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides DATABASE_URL from the environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config: &SiteConfig) -> Result<()> {
    let database_url = match args.database_url.as_deref() {
        Some(url) => url,
        None => config
            .require_database_url()
            .context("Set DATABASE_URL or pass --database-url")?,
    };

    let pool = create_pool(database_url)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool).await.context("Migration failed")?;

    for table in Table::ALL {
        println!("✓ {}", table.name());
    }
    Ok(())
}
