//! Tag repository
//!
//! - upsert: INSERT with ON CONFLICT (name is the key)
//! - list: names only, ordered

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{Tag, TagName};

/// Tag repository
pub struct TagRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TagRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All tag names in alphabetical order.
    pub async fn list_names(&self) -> Result<Vec<String>, DbError> {
        let names = sqlx::query_scalar("SELECT tag_name FROM tags ORDER BY tag_name")
            .fetch_all(self.pool)
            .await?;
        Ok(names)
    }

    /// Fetch one tag, `None` if the name is unknown.
    pub async fn get(&self, name: &TagName) -> Result<Option<Tag>, DbError> {
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT tag_name, tag_content, tag_category FROM tags WHERE tag_name = $1",
        )
        .bind(name.as_str())
        .fetch_optional(self.pool)
        .await?;
        Ok(tag)
    }

    /// Insert a tag or overwrite the existing one with the same name.
    pub async fn upsert(&self, tag: &Tag) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO tags (tag_name, tag_content, tag_category)
            VALUES ($1, $2, $3)
            ON CONFLICT (tag_name) DO UPDATE
            SET tag_content = EXCLUDED.tag_content,
                tag_category = EXCLUDED.tag_category
            "#,
        )
        .bind(&tag.tag_name)
        .bind(&tag.tag_content)
        .bind(&tag.tag_category)
        .execute(self.pool)
        .await?;
        Ok(())
    }
}
