//! Basic-auth extractor.

use crate::{error::ApiError, state::AppState};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use feedback_desk_application::GateDecision;
use tracing::debug;

/// Proof that the request carried the configured operator credentials.
///
/// Place it before any body extractor so a rejected request never has its
/// payload parsed.
#[derive(Debug, Clone, Copy)]
pub struct Operator;

#[async_trait]
impl FromRequestParts<AppState> for Operator {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A header that is not visible ASCII cannot hold a Basic credential
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        match state.gate.check(header) {
            GateDecision::Authorized => Ok(Operator),
            GateDecision::Unauthorized(reason) => {
                debug!(reason = %reason, "Credential gate rejected request");
                Err(ApiError::Unauthorized {
                    reason,
                    challenge: state.gate.challenge(),
                })
            }
        }
    }
}
