//! Per-request service context.

use crate::middleware::RequestId;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use feedback_desk_application::ServiceContext;
use std::convert::Infallible;
use uuid::Uuid;

/// `ServiceContext` keyed by the request id set by `request_id_middleware`.
#[derive(Debug, Clone)]
pub struct RequestContext(pub ServiceContext);

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let correlation_id = parts
            .extensions
            .get::<RequestId>()
            .map(|id| id.as_str().to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(RequestContext(ServiceContext::new(correlation_id)))
    }
}

impl std::ops::Deref for RequestContext {
    type Target = ServiceContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
