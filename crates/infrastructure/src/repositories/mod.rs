//! Repository implementations for data persistence.
//!
//! PostgreSQL-backed implementations of the store ports defined in the
//! application layer.

mod feedback_repository;

pub use feedback_repository::*;
