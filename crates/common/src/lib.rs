//! Common utilities shared by every Feedback Desk crate.
//!
//! - Configuration management
//! - Telemetry (structured logging)
//! - DateTime helpers

pub mod config;
pub mod datetime;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, AuthConfig, DatabaseSettings, ServerConfig, TelemetryConfig};
pub use datetime::{format_datetime, now_utc};
pub use telemetry::init_tracing;

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
