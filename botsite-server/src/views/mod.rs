//! Base views and blueprints
//!
//! Every route is declared as a [`RouteView`] and mounted on a
//! [`Blueprint`] for one subdomain. Construction validates the view
//! declarations, so a malformed route table fails at startup with a
//! [`SetupError`] instead of panicking inside axum.

pub mod blueprint;
pub mod manager;

use std::ops::RangeInclusive;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::MethodRouter;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::db::Table;
use crate::http::Subdomain;
use crate::state::AppState;

pub use blueprint::Blueprint;
pub use manager::RouteManager;

/// View names: lowercase identifier, dots allowed for namespacing
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$").expect("invalid view name regex"));

/// Invalid view or blueprint declaration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("view name '{name}' must be a lowercase identifier")]
    InvalidName { name: String },

    #[error("view '{name}' has path '{path}', which must start with '/' and contain no whitespace")]
    InvalidPath { name: String, path: String },

    #[error("view name '{name}' is registered twice on the {subdomain} blueprint")]
    DuplicateName { name: String, subdomain: Subdomain },

    #[error("path '{path}' is registered twice on the {subdomain} blueprint")]
    DuplicatePath { path: String, subdomain: Subdomain },

    #[error("error view '{name}' must cover HTTP error statuses (400-599), got {start}-{end}")]
    InvalidErrorCodes { name: String, start: u16, end: u16 },

    #[error("error views '{first}' and '{second}' cover overlapping statuses")]
    OverlappingErrorViews { first: String, second: String },

    #[error("view is bound to unknown table '{table}'")]
    UnknownTable { table: String },
}

fn check_name(name: &str) -> Result<(), SetupError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(SetupError::InvalidName {
            name: name.to_owned(),
        })
    }
}

/// Database binding of a view; the table must be one migrations create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbBinding {
    table: Table,
}

impl DbBinding {
    pub fn setup(table_name: &str) -> Result<Self, SetupError> {
        Table::from_name(table_name)
            .map(|table| Self { table })
            .ok_or_else(|| SetupError::UnknownTable {
                table: table_name.to_owned(),
            })
    }

    pub fn table(&self) -> Table {
        self.table
    }
}

/// A routed view: name, path and the method handlers behind it
pub struct RouteView {
    name: &'static str,
    path: &'static str,
    binding: Option<DbBinding>,
    timed: bool,
    handler: MethodRouter<Arc<AppState>>,
}

impl RouteView {
    pub fn setup(
        name: &'static str,
        path: &'static str,
        handler: MethodRouter<Arc<AppState>>,
    ) -> Result<Self, SetupError> {
        check_name(name)?;

        if !path.starts_with('/') || path.chars().any(char::is_whitespace) {
            return Err(SetupError::InvalidPath {
                name: name.to_owned(),
                path: path.to_owned(),
            });
        }

        Ok(Self {
            name,
            path,
            binding: None,
            timed: true,
            handler,
        })
    }

    /// Declare the table this view reads or writes
    pub fn bind_table(mut self, table_name: &str) -> Result<Self, SetupError> {
        self.binding = Some(DbBinding::setup(table_name)?);
        Ok(self)
    }

    /// Exempt the view from the request timeout.
    ///
    /// For handlers that must run to completion once started, such as
    /// webhook relays whose sender retries on anything but 200.
    pub fn without_timeout(mut self) -> Self {
        self.timed = false;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn binding(&self) -> Option<DbBinding> {
        self.binding
    }

    pub fn is_timed(&self) -> bool {
        self.timed
    }

    pub(crate) fn into_parts(self) -> (&'static str, bool, MethodRouter<Arc<AppState>>) {
        (self.path, self.timed, self.handler)
    }
}

/// Renders error responses for a range of HTTP statuses
#[derive(Clone)]
pub struct ErrorView {
    name: &'static str,
    codes: RangeInclusive<u16>,
    render: fn(StatusCode) -> Response,
}

impl ErrorView {
    pub fn setup(
        name: &'static str,
        codes: RangeInclusive<u16>,
        render: fn(StatusCode) -> Response,
    ) -> Result<Self, SetupError> {
        check_name(name)?;

        let (start, end) = (*codes.start(), *codes.end());
        if codes.is_empty() || start < 400 || end > 599 {
            return Err(SetupError::InvalidErrorCodes {
                name: name.to_owned(),
                start,
                end,
            });
        }

        Ok(Self {
            name,
            codes,
            render,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn handles(&self, status: StatusCode) -> bool {
        self.codes.contains(&status.as_u16())
    }

    pub fn overlaps(&self, other: &ErrorView) -> bool {
        self.codes.start() <= other.codes.end() && other.codes.start() <= self.codes.end()
    }

    pub fn render(&self, status: StatusCode) -> Response {
        (self.render)(status)
    }
}

/// Route table entry, for listing and logging
#[derive(Debug, Clone, Serialize)]
pub struct RouteInfo {
    pub subdomain: Subdomain,
    pub name: &'static str,
    pub path: &'static str,
    pub table: Option<&'static str>,
    /// Whether the request timeout applies
    pub timed: bool,
}
