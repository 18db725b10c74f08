//! List every view registered on each subdomain

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use botsite_core::SiteConfig;
use botsite_server::http::Subdomain;
use botsite_server::RouteManager;

/// Arguments for the routes command
#[derive(Parser, Debug)]
pub struct RoutesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run_routes(args: RoutesArgs, config: SiteConfig) -> Result<()> {
    let manager = RouteManager::new(Arc::new(config)).context("Invalid route table")?;
    let routes = manager.routes();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    for route in routes {
        let host = match route.subdomain {
            Subdomain::Main => manager.server_name().to_string(),
            sub => format!("{}.{}", sub, manager.server_name()),
        };
        println!(
            "{:<28} {:<24} {:<16} {:<8} {}",
            host,
            route.path,
            route.name,
            route.table.unwrap_or("-"),
            if route.timed { "" } else { "no-timeout" }
        );
    }
    Ok(())
}
