//! Subdomain resolution from the request host

use std::fmt;

use axum::extract::Request;
use axum::http::header::HOST;
use serde::Serialize;

/// The site a request is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subdomain {
    /// Public landing page: bare host, `www.` or anything unrecognised
    Main,
    Staff,
    Api,
}

impl Subdomain {
    /// Resolve a host (optionally with port) against the configured server name.
    ///
    /// Hosts outside the server name fall back to the main site.
    pub fn resolve(host: &str, server_name: &str) -> Self {
        let host = strip_port(host).trim_end_matches('.').to_ascii_lowercase();
        let server_name = strip_port(server_name).to_ascii_lowercase();

        let Some(prefix) = host
            .strip_suffix(server_name.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
        else {
            return Self::Main;
        };

        match prefix {
            "api" => Self::Api,
            "staff" => Self::Staff,
            _ => Self::Main,
        }
    }

    /// Resolve from the URI authority, falling back to the `Host` header
    pub fn from_request(request: &Request, server_name: &str) -> Self {
        let host = request
            .uri()
            .host()
            .or_else(|| request.headers().get(HOST).and_then(|h| h.to_str().ok()));

        match host {
            Some(host) => Self::resolve(host, server_name),
            None => Self::Main,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Staff => "staff",
            Self::Api => "api",
        }
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literals keep their colons
    if let Some(end) = host.find(']') {
        return &host[..=end];
    }
    host.split(':').next().unwrap_or(host)
}
