//! Database layer - connection pool, migrations and the site store
//!
//! Handlers only see [`SiteStore`]. Production runs on [`PgStore`];
//! [`MemoryStore`] backs tests and `serve --in-memory`.
//!
//! - Upserts via ON CONFLICT, no check-then-insert
//! - Bulk writes in a single transaction

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use memory::MemoryStore;
pub use migrations::Table;
pub use pool::{create_pool, create_pool_with, PoolSettings};
pub use repos::PgStore;
pub use store::{DbError, SiteStore};
