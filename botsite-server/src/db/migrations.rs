//! Schema for the tables the API reads and writes

use sqlx::PgPool;

use super::DbError;

/// Tables owned by the site. Views bind to these by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Tags,
    Users,
}

impl Table {
    pub const ALL: [Table; 2] = [Table::Tags, Table::Users];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tags => "tags",
            Self::Users => "users",
        }
    }

    /// Look up a table by its SQL name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|table| table.name() == name)
    }

    fn ddl(&self) -> &'static str {
        match self {
            Self::Tags => {
                r#"
                CREATE TABLE IF NOT EXISTS tags (
                    tag_name TEXT PRIMARY KEY,
                    tag_content TEXT NOT NULL,
                    tag_category TEXT
                )
                "#
            }
            Self::Users => {
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    user_id BIGINT PRIMARY KEY,
                    role BIGINT NOT NULL
                )
                "#
            }
        }
    }
}

/// Create every table that does not exist yet
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running site migrations...");

    for table in Table::ALL {
        sqlx::query(table.ddl()).execute(pool).await?;
        tracing::debug!(table = table.name(), "table ready");
    }

    tracing::info!("Site migrations complete");
    Ok(())
}
