//! Storage seam between handlers and the database

use async_trait::async_trait;

use crate::models::{Tag, TagName, UserRole, WriteSummary};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Pass-through persistence used by the API views
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Check the backend is reachable
    async fn ping(&self) -> Result<(), DbError>;

    /// All tag names, sorted
    async fn list_tag_names(&self) -> Result<Vec<String>, DbError>;

    async fn get_tag(&self, name: &TagName) -> Result<Option<Tag>, DbError>;

    /// Insert a tag, replacing content and category if the name exists
    async fn upsert_tag(&self, tag: &Tag) -> Result<(), DbError>;

    /// Insert or update roles for every user in one write
    async fn upsert_users(&self, users: &[UserRole]) -> Result<WriteSummary, DbError>;
}
