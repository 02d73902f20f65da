//! HTTP route handlers.
//!
//! Operational endpoints live at the root; the feedback resource under `/api`.

pub mod feedback;
pub mod health;

pub use feedback::routes as feedback_routes;
pub use health::routes as health_routes;
