//! Application layer for Feedback Desk
//!
//! This crate holds the business rules of the feedback resource and the
//! ports the infrastructure layer plugs into.
//!
//! ## Modules
//!
//! - `services` - `FeedbackService` and the per-request `ServiceContext`
//! - `store` - The `FeedbackStore` port and an in-memory implementation
//! - `auth` - `CredentialGate`, the shared basic-auth credential check

pub mod auth;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use auth::{CredentialGate, GateDecision, RejectReason};
pub use services::{FeedbackService, ServiceContext};
pub use store::{FeedbackQuery, FeedbackStore, InMemoryFeedbackStore, StoreError, StoreResult};

use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Missing or malformed field, or a status outside the accepted set
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The store could not be reached or failed the operation
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::NotFound(_) => 404,
            ApplicationError::StoreUnavailable(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApplicationError::NotFound(format!("Feedback {}", id)),
            StoreError::Unavailable(msg) => ApplicationError::StoreUnavailable(msg),
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
