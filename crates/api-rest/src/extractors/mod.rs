//! Custom Axum extractors.
//!
//! This module provides reusable extractors for the basic-auth gate, the
//! per-request service context, query strings and validated JSON payloads.

pub mod auth;
pub mod context;
pub mod query;
pub mod validated_json;

pub use auth::Operator;
pub use context::RequestContext;
pub use query::ApiQuery;
pub use validated_json::ValidatedJson;
