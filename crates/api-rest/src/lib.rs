//! Feedback Desk REST API
//!
//! Axum-based HTTP surface for the feedback resource: public submission and
//! search, operator-only update and delete behind HTTP Basic credentials,
//! health and readiness checks, and OpenAPI documentation.
//!
//! ## Architecture
//!
//! - **app**: Router assembly and middleware stack
//! - **routes**: HTTP route handlers
//! - **middleware**: Request ID and request logging middleware
//! - **extractors**: Operator credential check, request context, validated JSON
//! - **responses**: Standardized response types
//! - **error**: HTTP error handling and conversion
//! - **state**: Shared state and the type-erased service interface
//!
//! ## Usage
//!
//! ```rust,no_run
//! use feedback_desk_api_rest::{create_app, AppState};
//! use feedback_desk_common::AppConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().expect("Failed to load config");
//!     let app = create_app(AppState::new(config));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
//!         .await
//!         .expect("Failed to bind");
//!
//!     axum::serve(listener, app)
//!         .await
//!         .expect("Server error");
//! }
//! ```

#![warn(clippy::all)]

pub mod app;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::create_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
