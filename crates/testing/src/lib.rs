//! Testing utilities for Feedback Desk
//!
//! - Fixtures producing realistic feedback data with `fake`
//! - Fluent builders for records and creation inputs
//! - A PostgreSQL test database helper
//!
//! # Examples
//!
//! ```
//! use feedback_desk_testing::{builders::*, fixtures::*};
//! use feedback_desk_domain::FeedbackStatus;
//!
//! let input = create_test_new_feedback();
//! assert!(input.validate().valid);
//!
//! let record = FeedbackRecordBuilder::new()
//!     .with_subject("Broken link")
//!     .with_status(FeedbackStatus::Replied)
//!     .build();
//! assert_eq!(record.subject, "Broken link");
//! ```

pub mod builders;
pub mod database;
pub mod fixtures;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
