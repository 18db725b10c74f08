//! Print the effective configuration with secrets masked

use anyhow::Result;
use clap::Parser;

use botsite_core::SiteConfig;

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output as a JSON object
    #[arg(long)]
    pub json: bool,
}

pub fn run_config(args: ConfigArgs, config: &SiteConfig) -> Result<()> {
    let entries = config.redacted();

    if args.json {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), serde_json::Value::String(value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in entries {
        println!("{:width$}  {}", key, value, width = width);
    }
    Ok(())
}
