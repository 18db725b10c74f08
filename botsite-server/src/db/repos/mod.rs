//! Postgres repositories and the [`SiteStore`] implementation over them
//!
//! - Upserts via ON CONFLICT (no check-then-insert)
//! - Bulk writes in one transaction

pub mod tags;
pub mod users;

use async_trait::async_trait;
use sqlx::PgPool;

pub use tags::TagRepo;
pub use users::UserRepo;

use super::{migrations, DbError, SiteStore};
use crate::models::{Tag, TagName, UserRole, WriteSummary};

/// Store backed by a Postgres pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, create missing tables and return the store
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let pool = super::create_pool(database_url).await?;
        migrations::run(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SiteStore for PgStore {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_tag_names(&self) -> Result<Vec<String>, DbError> {
        TagRepo::new(&self.pool).list_names().await
    }

    async fn get_tag(&self, name: &TagName) -> Result<Option<Tag>, DbError> {
        TagRepo::new(&self.pool).get(name).await
    }

    async fn upsert_tag(&self, tag: &Tag) -> Result<(), DbError> {
        TagRepo::new(&self.pool).upsert(tag).await
    }

    async fn upsert_users(&self, users: &[UserRole]) -> Result<WriteSummary, DbError> {
        UserRepo::new(&self.pool).upsert_many(users).await
    }
}
