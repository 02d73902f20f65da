//! HTTP middleware components.
//!
//! Request ID propagation and per-request access logging live together in
//! [`request_id`].

pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
