//! Infrastructure layer for Feedback Desk
//!
//! This crate provides the PostgreSQL side of the service:
//! - Connection pool management and health checks
//! - Database bootstrap (create if missing) and migrations
//! - The explicit table schema
//! - `PgFeedbackRepository`, the persistent `FeedbackStore`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use feedback_desk_infrastructure::{
//!     database::{ensure_database, DatabaseConfig, DatabasePool},
//!     repositories::PgFeedbackRepository,
//! };
//!
//! let db_config = DatabaseConfig::from_settings(&app_config.database)?;
//! ensure_database(&db_config).await?;
//! let pool = DatabasePool::new(&db_config).await?;
//! pool.run_migrations(&default_migrations_dir()).await?;
//!
//! let feedback_repo = PgFeedbackRepository::new(pool.clone());
//! ```

pub mod database;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use database::{
    default_migrations_dir, ensure_database, DatabaseConfig, DatabasePool, HealthStatus,
};
pub use repositories::PgFeedbackRepository;

// Re-export result and error types
pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration loading or execution errors
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be mapped back to a domain value
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Configuration("empty url".to_string());
        assert_eq!(err.to_string(), "Configuration error: empty url");
    }
}
