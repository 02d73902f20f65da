//! Application Services
//!
//! Business logic orchestration over the store port.

mod feedback;

pub use feedback::*;

/// Service context for request handling
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Request correlation ID for tracing
    pub correlation_id: String,
}

impl ServiceContext {
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
        }
    }
}
