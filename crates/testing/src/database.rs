//! PostgreSQL test database helper.
//!
//! Points at an existing server (usually from `DATABASE_URL`), applies the
//! workspace migrations and truncates the feedback table between tests.

use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};
use std::path::Path;

/// Test database wrapper with table cleanup
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect using `DATABASE_URL`.
    pub async fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set for database tests"))?;
        Self::new_with_url(&url).await
    }

    /// Connect to `connection_string` and apply migrations.
    pub async fn new_with_url(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        let migrations = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
        Migrator::new(migrations).await?.run(&pool).await?;

        Ok(Self { pool })
    }

    /// Get a reference to the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Remove every feedback row
    pub async fn clean(&self) -> anyhow::Result<()> {
        sqlx::query("TRUNCATE TABLE feedback")
            .execute(self.pool())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires PostgreSQL; run with DATABASE_URL set
    async fn test_database_setup_and_clean() {
        let db = TestDatabase::from_env().await.unwrap();
        db.clean().await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
