//! HTTP error handling and conversion.
//!
//! Every failure leaves the API as `{"error": CODE, "message": text}` with
//! the matching status code. Unauthorized responses also carry the Basic
//! challenge header.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use feedback_desk_application::{ApplicationError, RejectReason};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Error code shared by every 400 response
pub const INVALID_INPUT: &str = "INVALID_INPUT";

/// API-specific error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Application layer error
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Rejected by the credential gate
    #[error("{reason}")]
    Unauthorized {
        /// Why the credentials were refused
        reason: RejectReason,
        /// `WWW-Authenticate` value to send back
        challenge: String,
    },

    /// Body or query string that could not be read, or failed field rules
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Application(err) => StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Application(err) => err.error_code(),
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidInput(_) => INVALID_INPUT,
            Self::NotFound(_) => "NOT_FOUND",
        }
    }

    /// Message shown to the client. Server-side failures are not described.
    fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

/// Standardized error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code
    pub error: String,

    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = ?self, "Request failed with internal error");
        }

        let body = ErrorResponse::new(self.error_code(), self.public_message());
        let mut response = (status, Json(body)).into_response();

        if let Self::Unauthorized { challenge, .. } = &self {
            if let Ok(value) = HeaderValue::from_str(challenge) {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, value);
            }
        }

        response
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApplicationError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (ApplicationError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApplicationError::StoreUnavailable("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_every_bad_request_shares_one_code() {
        let boundary = ApiError::InvalidInput("Invalid JSON".into());
        let service = ApiError::from(ApplicationError::InvalidInput("subject: is required".into()));

        assert_eq!(boundary.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(boundary.error_code(), INVALID_INPUT);
        assert_eq!(service.error_code(), INVALID_INPUT);
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = ApiError::Unauthorized {
            reason: RejectReason::MissingHeader,
            challenge: "Basic realm=\"Restricted Area\"".into(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"Restricted Area\""
        );
    }

    #[test]
    fn test_store_details_are_hidden() {
        let err = ApiError::from(ApplicationError::StoreUnavailable("password=hunter2".into()));
        assert_eq!(err.public_message(), "Internal server error");
        assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
    }
}
