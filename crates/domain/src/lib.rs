//! Feedback Desk Domain Types
//!
//! This crate provides the core domain model for the Feedback Desk service:
//! the feedback record, its status enumeration, the inputs accepted for
//! creating and patching a record, and the field rules shared by every layer.
//!
//! ## Architecture
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers
//! - **feedback**: The feedback record, its status and its inputs
//! - **validation**: Validation result types and the field rules
//!
//! ## Usage
//!
//! ```rust
//! use feedback_desk_domain::{FeedbackId, FeedbackStatus};
//!
//! let id = FeedbackId::new();
//! assert_ne!(id.to_string(), "");
//!
//! let status: FeedbackStatus = "replied".parse().unwrap();
//! assert_eq!(status.as_str(), "replied");
//! assert!("archived".parse::<FeedbackStatus>().is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod feedback;
pub mod identifiers;
pub mod validation;

pub use feedback::{
    parse_status_filter, FeedbackPatch, FeedbackRecord, FeedbackStatus, NewFeedback,
    StatusParseError,
};
pub use identifiers::FeedbackId;
pub use validation::{ValidationIssue, ValidationResult};
