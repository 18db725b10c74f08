//! Postgres pool for the site store

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connection limits for the site pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// How long a request waits for a free connection
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Create a pool with [`PoolSettings::default`].
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/botsite").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with(database_url, PoolSettings::default()).await
}

pub async fn create_pool_with(
    database_url: &str,
    settings: PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        max_connections = settings.max_connections,
        "connecting to database"
    );
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_allow_concurrent_requests() {
        let settings = PoolSettings::default();
        assert!(settings.max_connections > 1);
        assert!(settings.acquire_timeout > Duration::ZERO);
    }

    // Run with: DATABASE_URL=postgres://... cargo test -p botsite-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn single_connection_pool_serves_queries() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with(
            &url,
            PoolSettings {
                max_connections: 1,
                ..PoolSettings::default()
            },
        )
        .await
        .expect("pool creation failed");

        for i in 0..3 {
            let (value,): (i32,) = sqlx::query_as("SELECT $1::int")
                .bind(i)
                .fetch_one(&pool)
                .await
                .expect("query failed");
            assert_eq!(value, i);
        }
    }
}
