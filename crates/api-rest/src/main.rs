//! Feedback Desk API server
//!
//! Loads configuration, prepares the database and serves the REST API.

use anyhow::{Context, Result};
use clap::Parser;
use feedback_desk_api_rest::{create_app, AppState};
use feedback_desk_common::{telemetry, AppConfig};
use feedback_desk_infrastructure::{
    default_migrations_dir, ensure_database, DatabaseConfig, DatabasePool, PgFeedbackRepository,
};
use std::{path::PathBuf, sync::Arc};
use tokio::signal;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "feedback-desk-api")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml and {APP_ENV}.toml
    #[arg(short, long, env = "APP_CONFIG_DIR", default_value = "config")]
    config: PathBuf,

    /// Host to bind to
    #[arg(long, env = "APP_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "APP_PORT")]
    port: Option<u16>,

    /// Do not run database migrations on startup
    #[arg(long, env = "APP_SKIP_MIGRATIONS")]
    skip_migrations: bool,

    /// Migrations directory
    #[arg(long, env = "APP_MIGRATIONS_DIR")]
    migrations_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;

    // Override with CLI arguments
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    telemetry::init_from_config(&config.telemetry)?;

    info!(
        service = %config.telemetry.service_name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Feedback Desk API"
    );

    let db_config = DatabaseConfig::from_settings(&config.database)
        .context("building database connection options")?;
    ensure_database(&db_config)
        .await
        .context("ensuring the database exists")?;

    let pool = DatabasePool::new(&db_config)
        .await
        .context("connecting to the database")?;

    if args.skip_migrations {
        info!("Skipping database migrations");
    } else {
        let dir = args.migrations_dir.unwrap_or_else(default_migrations_dir);
        pool.run_migrations(&dir)
            .await
            .with_context(|| format!("running migrations from {}", dir.display()))?;
    }

    let store = Arc::new(PgFeedbackRepository::new(pool.clone()));
    let address = config.server_address();
    let app = create_app(AppState::with_store(config, store));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {}", address))?;
    info!(address = %address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Server shut down gracefully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Received shutdown signal");
}
