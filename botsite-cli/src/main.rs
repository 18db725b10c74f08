//! botsite CLI - run and administer the community bot website
//!
//! - `serve`: run the main, staff and API subdomains
//! - `migrate`: create the tags and users tables
//! - `config`: print the effective configuration, secrets masked
//! - `routes`: list every registered view

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use botsite_core::{LogLevel, SiteConfig};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "botsite",
    author,
    version,
    about = "Website backend for the community bot: landing page, staff area and bot API"
)]
struct Cli {
    /// Override LOG_LEVEL (debug, info, warning, error, critical)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Export traces over OTLP (needs the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create missing database tables
    Migrate(commands::migrate::MigrateArgs),
    /// Show the effective configuration (secrets masked)
    Config(commands::config::ConfigArgs),
    /// List registered views per subdomain
    Routes(commands::routes::RoutesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = SiteConfig::from_env().context("Invalid configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    tracing_setup::init(&tracing_setup::TracingConfig {
        level: config.log_level,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await,
        Commands::Migrate(args) => commands::run_migrate(args, &config).await,
        Commands::Config(args) => commands::run_config(args, &config),
        Commands::Routes(args) => commands::run_routes(args, config),
    };

    tracing_setup::shutdown_otel();
    result
}
