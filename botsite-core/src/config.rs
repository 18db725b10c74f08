//! Site configuration loaded from environment variables.
//!
//! Every setting has an environment variable; the CLI loads `.env` first and
//! lets flags override individual values. Parsing goes through
//! [`SiteConfig::from_lookup`] so tests never touch the process environment.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::error::{CoreError, Result};

pub const DEFAULT_SERVER_NAME: &str = "pythondiscord.local";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ASANA_API_URL: &str = "https://app.asana.com/api/1.0";
pub const DEFAULT_INVITE_URL: &str = "https://discord.gg/8NWhsvT";
pub const DEFAULT_DATADOG_URL: &str = "https://app.datadoghq.com/dashboard/lists";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Log verbosity accepted by `LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            // tracing has no level above error
            Self::Error | Self::Critical => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            other => Err(CoreError::config(
                "LOG_LEVEL",
                format!("unknown level '{}' (expected debug, info, warning, error or critical)", other),
            )),
        }
    }
}

/// Asana relay settings
#[derive(Clone, Default)]
pub struct AsanaConfig {
    /// Path secret the webhook URL must carry (`/asana/{key}`)
    pub key: Option<String>,
    /// Chat webhook that receives the rendered embeds
    pub webhook_url: Option<String>,
    /// Personal access token for the Asana REST API
    pub token: Option<String>,
    pub api_url: String,
}

/// Complete site configuration
#[derive(Clone)]
pub struct SiteConfig {
    /// Base host name; subdomains are resolved relative to it
    pub server_name: String,
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    /// Key the bot must present in `X-API-Key`
    pub bot_api_key: Option<String>,
    /// Session signing key (`WEBPAGE_SECRET_KEY`)
    pub secret_key: Option<String>,
    pub asana: AsanaConfig,
    pub invite_url: String,
    pub datadog_url: String,
    pub log_level: LogLevel,
    pub request_timeout: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database_url: None,
            bot_api_key: None,
            secret_key: None,
            asana: AsanaConfig {
                api_url: DEFAULT_ASANA_API_URL.to_string(),
                ..AsanaConfig::default()
            },
            invite_url: DEFAULT_INVITE_URL.to_string(),
            datadog_url: DEFAULT_DATADOG_URL.to_string(),
            log_level: LogLevel::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl SiteConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_level = match get("LOG_LEVEL") {
            Some(level) => level.parse()?,
            None => LogLevel::default(),
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| CoreError::config("BIND_ADDR", e.to_string()))?;

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    CoreError::config("REQUEST_TIMEOUT_SECS", format!("'{}' is not a positive integer", raw))
                })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let server_name = get("SERVER_NAME")
            .map(|name| name.trim().trim_end_matches('.').to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string());

        Ok(Self {
            server_name,
            bind_addr,
            database_url: get("DATABASE_URL"),
            bot_api_key: get("BOT_API_KEY"),
            secret_key: get("WEBPAGE_SECRET_KEY"),
            asana: AsanaConfig {
                key: get("ASANA_KEY"),
                webhook_url: get("ASANA_WEBHOOK"),
                token: get("ASANA_TOKEN"),
                api_url: get("ASANA_API_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_ASANA_API_URL.to_string()),
            },
            invite_url: get("INVITE_URL").unwrap_or_else(|| DEFAULT_INVITE_URL.to_string()),
            datadog_url: get("DATADOG_URL").unwrap_or_else(|| DEFAULT_DATADOG_URL.to_string()),
            log_level,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The database URL, or an error naming the variable to set
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| CoreError::missing_var("DATABASE_URL"))
    }

    /// Key/value listing with secrets masked, for `botsite config`
    pub fn redacted(&self) -> Vec<(&'static str, String)> {
        vec![
            ("SERVER_NAME", self.server_name.clone()),
            ("BIND_ADDR", self.bind_addr.to_string()),
            ("DATABASE_URL", mask(&self.database_url)),
            ("BOT_API_KEY", mask(&self.bot_api_key)),
            ("WEBPAGE_SECRET_KEY", mask(&self.secret_key)),
            ("ASANA_KEY", mask(&self.asana.key)),
            ("ASANA_WEBHOOK", mask(&self.asana.webhook_url)),
            ("ASANA_TOKEN", mask(&self.asana.token)),
            ("ASANA_API_URL", self.asana.api_url.clone()),
            ("INVITE_URL", self.invite_url.clone()),
            ("DATADOG_URL", self.datadog_url.clone()),
            ("LOG_LEVEL", format!("{:?}", self.log_level).to_ascii_lowercase()),
            ("REQUEST_TIMEOUT_SECS", self.request_timeout.as_secs().to_string()),
        ]
    }
}

fn mask(value: &Option<String>) -> String {
    match value {
        Some(_) => "<set>".to_string(),
        None => "<unset>".to_string(),
    }
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.redacted() {
            map.entry(&key, &value);
        }
        map.finish()
    }
}
