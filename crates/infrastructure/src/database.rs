//! Database module - PostgreSQL connection pool and bootstrap
//!
//! Provides pool management, health checks, creation of a missing database,
//! and migration execution for the Feedback Desk service.

use feedback_desk_common::DatabaseSettings;
use sqlx::{
    migrate::{MigrateDatabase, Migrator},
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, Connection, PgConnection, PgPool, Postgres,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::{Error, Result};

/// Database maintenance connects here to create the application database.
const MAINTENANCE_DATABASE: &str = "postgres";

/// Database configuration for PostgreSQL connections.
///
/// Credentials are carried as connect options, never spliced into a URL, so
/// passwords may contain any character.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Target server, credentials and database
    pub connect_options: PgConnectOptions,
    /// Explicit connection URL, when one was configured
    pub url: Option<String>,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep open
    pub min_connections: u32,
    /// Timeout for acquiring a connection from the pool
    pub acquire_timeout: Duration,
    /// Maximum time a connection can be idle before being closed
    pub idle_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    /// Build the pool configuration from the application settings.
    ///
    /// `settings.url` wins when set; otherwise host, port, credentials and
    /// name are passed to the driver as separate fields.
    pub fn from_settings(settings: &DatabaseSettings) -> Result<Self> {
        let url = settings.url.clone().filter(|u| !u.is_empty());

        let connect_options = match &url {
            Some(url) => PgConnectOptions::from_str(url).map_err(|e| {
                Error::Configuration(format!("invalid database URL: {}", e))
            })?,
            None => {
                let mut options = PgConnectOptions::new()
                    .host(&settings.host)
                    .port(settings.port)
                    .database(&settings.name);
                if !settings.username.is_empty() {
                    options = options.username(&settings.username);
                }
                if !settings.password.is_empty() {
                    options = options.password(&settings.password);
                }
                options
            }
        };

        Ok(Self {
            connect_options,
            url,
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            acquire_timeout: settings.timeout(),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        })
    }

    /// Name of the database the pool connects to.
    pub fn database_name(&self) -> Option<&str> {
        self.connect_options.get_database()
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.connect_options.get_host())
            .field("port", &self.connect_options.get_port())
            .field("database", &self.database_name())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

/// `migrations/` at the workspace root.
pub fn default_migrations_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations")
}

/// Create the configured database when it does not exist yet.
///
/// With an explicit URL the driver's own helpers are used. Otherwise the
/// check runs over a connection to the `postgres` maintenance database built
/// from the same connect options.
#[instrument(skip(config))]
pub async fn ensure_database(config: &DatabaseConfig) -> Result<()> {
    if let Some(url) = &config.url {
        if Postgres::database_exists(url).await? {
            info!("Database already exists");
        } else {
            Postgres::create_database(url).await?;
            info!("Database created");
        }
        return Ok(());
    }

    let name = config
        .database_name()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::Configuration("database name is empty".to_string()))?
        .to_string();

    let mut conn: PgConnection = config
        .connect_options
        .clone()
        .database(MAINTENANCE_DATABASE)
        .connect()
        .await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&name)
            .fetch_one(&mut conn)
            .await?;

    if exists {
        info!(database = %name, "Database already exists");
    } else {
        sqlx::query(&format!("CREATE DATABASE {}", quote_identifier(&name)))
            .execute(&mut conn)
            .await?;
        info!(database = %name, "Database created");
    }

    conn.close().await?;
    Ok(())
}

/// Quote `name` as a Postgres identifier.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Database connection pool wrapper with health monitoring.
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Create a new database pool with the given configuration.
    #[instrument(skip(config), fields(max_connections = config.max_connections))]
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Initializing database connection pool");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .max_lifetime(Some(config.max_lifetime))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("SET timezone = 'UTC'")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect_with(config.connect_options.clone())
            .await
            .map_err(Error::Database)?;

        info!("Database pool initialized successfully");
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get reference to the underlying pool.
    #[inline]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations from `dir`.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self, dir: &Path) -> Result<()> {
        let migrator = Migrator::new(dir.to_path_buf()).await?;
        migrator.run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Check database health by executing a simple query.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<HealthStatus> {
        let start = std::time::Instant::now();

        match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => {
                let latency = start.elapsed();
                debug!(latency_ms = latency.as_millis(), "Health check passed");
                Ok(HealthStatus {
                    healthy: true,
                    latency,
                    pool_size: self.pool.size(),
                    idle_connections: self.pool.num_idle(),
                    error: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Health check failed");
                Ok(HealthStatus {
                    healthy: false,
                    latency: start.elapsed(),
                    pool_size: self.pool.size(),
                    idle_connections: self.pool.num_idle(),
                    error: Some(e.to_string()),
                })
            }
        }
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .finish()
    }
}

/// Health status for database connections.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database is healthy
    pub healthy: bool,
    /// Query latency
    pub latency: Duration,
    /// Current pool size
    pub pool_size: u32,
    /// Number of idle connections
    pub idle_connections: usize,
    /// Error message if unhealthy
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DatabaseSettings {
        DatabaseSettings {
            username: "postgres".into(),
            password: "pw".into(),
            max_connections: 7,
            timeout_seconds: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_from_settings() {
        let config = DatabaseConfig::from_settings(&settings()).unwrap();
        assert_eq!(config.connect_options.get_host(), "localhost");
        assert_eq!(config.connect_options.get_port(), 5432);
        assert_eq!(config.database_name(), Some("feedback"));
        assert_eq!(config.max_connections, 7);
        assert_eq!(config.acquire_timeout, Duration::from_secs(3));
        assert!(config.url.is_none());
    }

    #[test]
    fn test_reserved_characters_in_password_keep_target_intact() {
        let settings = DatabaseSettings {
            host: "db.internal".into(),
            password: "p@ss/w#rd:?x".into(),
            ..settings()
        };

        let config = DatabaseConfig::from_settings(&settings).unwrap();

        assert_eq!(config.connect_options.get_host(), "db.internal");
        assert_eq!(config.connect_options.get_port(), 5432);
        assert_eq!(config.connect_options.get_username(), "postgres");
        assert_eq!(config.database_name(), Some("feedback"));
        assert!(!format!("{:?}", config).contains("p@ss"));
    }

    #[test]
    fn test_explicit_url_wins() {
        let settings = DatabaseSettings {
            url: Some("postgres://app:pw@other:6543/elsewhere".into()),
            ..settings()
        };

        let config = DatabaseConfig::from_settings(&settings).unwrap();

        assert_eq!(config.connect_options.get_host(), "other");
        assert_eq!(config.connect_options.get_port(), 6543);
        assert_eq!(config.database_name(), Some("elsewhere"));
        assert!(config.url.is_some());
    }

    #[test]
    fn test_invalid_url_is_configuration_error() {
        let settings = DatabaseSettings {
            url: Some("postgres://app:pw@host:notaport/db".into()),
            ..settings()
        };
        assert!(matches!(
            DatabaseConfig::from_settings(&settings),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("feedback"), "\"feedback\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_migrations_dir_exists() {
        assert!(default_migrations_dir().join("20240101000000_create_feedback.sql").exists());
    }

    #[tokio::test]
    async fn test_ensure_database_rejects_empty_name() {
        let settings = DatabaseSettings {
            name: String::new(),
            ..settings()
        };
        let config = DatabaseConfig::from_settings(&settings).unwrap();
        assert!(matches!(ensure_database(&config).await, Err(Error::Configuration(_))));
    }
}
