//! User role repository

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{UserRole, WriteSummary};

/// User role repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Upsert every role inside one transaction.
    ///
    /// `RETURNING (xmax = 0)` is true for fresh inserts and false for
    /// updates; rows whose role did not change are filtered by the WHERE
    /// clause and return nothing.
    pub async fn upsert_many(&self, users: &[UserRole]) -> Result<WriteSummary, DbError> {
        let mut tx = self.pool.begin().await?;
        let mut summary = WriteSummary::default();

        for user in users {
            let inserted: Option<bool> = sqlx::query_scalar(
                r#"
                INSERT INTO users (user_id, role) VALUES ($1, $2)
                ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role
                WHERE users.role IS DISTINCT FROM EXCLUDED.role
                RETURNING (xmax = 0)
                "#,
            )
            .bind(user.user_id)
            .bind(user.role)
            .fetch_optional(&mut *tx)
            .await?;

            match inserted {
                Some(true) => summary.inserted += 1,
                Some(false) => summary.replaced += 1,
                None => summary.unchanged += 1,
            }
        }

        tx.commit().await?;
        Ok(summary)
    }
}
