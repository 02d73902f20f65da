//! Configuration management for the application.
//!
//! Settings are loaded from, in increasing precedence:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml` (if it exists)
//! 3. `config/{APP_ENV}.toml` (if it exists, `APP_ENV` defaults to `development`)
//! 4. Environment variables prefixed with `APP_`, e.g. `APP_SERVER__PORT=3000`
//! 5. The legacy deployment variables `DB_HOST`, `DB_PORT`, `DB_USERNAME`,
//!    `DB_PASSWORD`, `DB_DATABASE`, `BASIC_USERNAME`, `BASIC_PASSWORD`
//!
//! The legacy variables are applied as overrides, so when both spellings are
//! set the legacy one wins.
//!
//! A `.env` file in the working directory is read first.
//!
//! ## Example Configuration
//!
//! ```toml
//! [server]
//! port = 3000
//!
//! [database]
//! host = "localhost"
//! username = "postgres"
//! password = "postgres"
//! name = "feedback"
//!
//! [auth]
//! username = "admin"
//! password = "secret"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_body_limit")]
    pub max_body_bytes: usize,

    /// Serve Swagger UI and the OpenAPI document
    #[serde(default = "default_enable_swagger")]
    pub enable_swagger: bool,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Database configuration
///
/// Either `url` is given, or the URL is assembled from the individual parts.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Full connection URL; takes precedence over the parts below
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Database name
    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_db_timeout")]
    pub timeout_seconds: u64,
}

/// Credentials for the mutating endpoints
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Realm advertised in the `WWW-Authenticate` challenge
    #[serde(default = "default_realm")]
    pub realm: String,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_body_limit() -> usize {
    64 * 1024
}

fn default_enable_swagger() -> bool {
    true
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "feedback".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_db_timeout() -> u64 {
    30
}

fn default_realm() -> String {
    "Restricted Area".to_string()
}

fn default_service_name() -> String {
    "feedback-desk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            max_body_bytes: default_body_limit(),
            enable_swagger: default_enable_swagger(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            host: default_db_host(),
            port: default_db_port(),
            username: String::new(),
            password: String::new(),
            name: default_db_name(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            timeout_seconds: default_db_timeout(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            realm: default_realm(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: false,
            log_level: default_log_level(),
        }
    }
}

/// Legacy variable names and the keys they override.
const LEGACY_ENV: [(&str, &str); 7] = [
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USERNAME", "database.username"),
    ("DB_PASSWORD", "database.password"),
    ("DB_DATABASE", "database.name"),
    ("BASIC_USERNAME", "auth.username"),
    ("BASIC_PASSWORD", "auth.password"),
];

impl AppConfig {
    /// Load configuration from the `config/` directory and the environment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use feedback_desk_common::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load configuration");
    /// println!("Server will run on {}:{}", config.server.host, config.server.port);
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// Load configuration using `dir` as the configuration file directory.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self> {
        // A missing .env file is normal outside local development.
        let _ = dotenvy::dotenv();

        let dir = dir.as_ref();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&env)).required(false));

        for (var, key) in LEGACY_ENV {
            builder = builder
                .set_override_option(key, std::env::var(var).ok())
                .with_context(|| format!("Failed to apply {}", var))?;
        }

        let config = builder
            // Example: APP_AUTH__PASSWORD=secret
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.max_body_bytes == 0 {
            anyhow::bail!("Request body limit must be greater than 0");
        }

        if self.server.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be greater than 0");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!("Database min connections cannot exceed max connections");
        }

        if self.database.url.is_none() && self.database.name.is_empty() {
            anyhow::bail!("Database name is required when no database URL is set");
        }

        if self.auth.username.is_empty() || self.auth.password.is_empty() {
            anyhow::bail!("Basic auth username and password are required");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}', must be one of: {}",
                self.telemetry.log_level,
                valid_levels.join(", ")
            );
        }

        Ok(())
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl DatabaseSettings {
    /// Get the acquire timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("realm", &self.realm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AppConfig {
        AppConfig {
            auth: AuthConfig {
                username: "admin".into(),
                password: "secret".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.auth.realm, "Restricted Area");
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn test_validate_requires_credentials() {
        assert!(AppConfig::default().validate().is_err());
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = valid();
        config.telemetry.log_level = "verbose".into();
        assert!(config.validate().is_err());

        let mut config = valid();
        config.database.min_connections = 20;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = valid();
        config.database.password = "db-secret".into();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("db-secret"));
        assert!(!rendered.contains("\"secret\""));
        assert!(rendered.contains("<redacted>"));
    }

    // ========================================================================
    // Layered loading
    // ========================================================================

    /// Every variable `load_from` reads. Tests hold `ENV_LOCK` and reset these.
    const TOUCHED_VARS: [&str; 12] = [
        "APP_ENV",
        "APP_SERVER__PORT",
        "APP_AUTH__USERNAME",
        "APP_AUTH__PASSWORD",
        "APP_DATABASE__NAME",
        "DB_HOST",
        "DB_PORT",
        "DB_USERNAME",
        "DB_PASSWORD",
        "DB_DATABASE",
        "BASIC_USERNAME",
        "BASIC_PASSWORD",
    ];

    static ENV_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock();
        for var in TOUCHED_VARS {
            std::env::remove_var(var);
        }
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        let result = f();
        for var in TOUCHED_VARS {
            std::env::remove_var(var);
        }
        result
    }

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    const CREDENTIALS: &str = "[auth]\nusername = \"file-user\"\npassword = \"file-pass\"\n";

    #[test]
    fn test_load_from_files_layers_environment_file_over_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "default.toml",
            &format!("{}[server]\nport = 4000\nhost = \"127.0.0.1\"\n", CREDENTIALS),
        );
        write(dir.path(), "staging.toml", "[server]\nport = 5000\n");

        // Act
        let config = with_env(&[("APP_ENV", "staging")], || AppConfig::load_from(dir.path()))
            .unwrap();

        // Assert
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.auth.username, "file-user");
        assert_eq!(config.database.port, 5432);
    }

    #[test]
    fn test_load_from_reads_prefixed_env_vars() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", CREDENTIALS);

        let config = with_env(
            &[
                ("APP_SERVER__PORT", "8081"),
                ("APP_AUTH__USERNAME", "env-user"),
                ("APP_DATABASE__NAME", "feedback_env"),
            ],
            || AppConfig::load_from(dir.path()),
        )
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.auth.username, "env-user");
        assert_eq!(config.auth.password, "file-pass");
        assert_eq!(config.database.name, "feedback_env");
    }

    #[test]
    fn test_load_from_reads_legacy_variables() {
        let dir = tempfile::tempdir().unwrap();

        let config = with_env(
            &[
                ("DB_HOST", "db.internal"),
                ("DB_PORT", "6543"),
                ("DB_USERNAME", "app"),
                ("DB_PASSWORD", "p@ss/w#rd"),
                ("DB_DATABASE", "legacy_db"),
                ("BASIC_USERNAME", "admin"),
                ("BASIC_PASSWORD", "secret"),
            ],
            || AppConfig::load_from(dir.path()),
        )
        .unwrap();

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.username, "app");
        assert_eq!(config.database.password, "p@ss/w#rd");
        assert_eq!(config.database.name, "legacy_db");
        assert_eq!(config.auth.username, "admin");
        assert_eq!(config.auth.password, "secret");
    }

    #[test]
    fn test_legacy_variables_win_over_prefixed_ones() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", CREDENTIALS);

        let config = with_env(
            &[
                ("BASIC_USERNAME", "legacy"),
                ("APP_AUTH__USERNAME", "modern"),
                ("APP_AUTH__PASSWORD", "modern-pass"),
            ],
            || AppConfig::load_from(dir.path()),
        )
        .unwrap();

        assert_eq!(config.auth.username, "legacy");
        assert_eq!(config.auth.password, "modern-pass");
    }

    #[test]
    fn test_load_from_without_credentials_fails_validation() {
        let dir = tempfile::tempdir().unwrap();

        let result = with_env(&[], || AppConfig::load_from(dir.path()));

        assert!(result.is_err());
    }
}
