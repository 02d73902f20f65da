//! Feedback endpoints.
//!
//! Reads and creation are public. Update and delete sit behind the basic-auth
//! gate, which runs before the body is read.

use crate::{
    error::{ApiError, ApiResult, ErrorResponse},
    extractors::{ApiQuery, Operator, RequestContext, ValidatedJson},
    responses::MessageResponse,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use feedback_desk_common::format_datetime;
use feedback_desk_domain::{FeedbackPatch, FeedbackRecord, FeedbackStatus, NewFeedback};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Feedback record as returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: Uuid,
    pub sender_name: String,
    pub email: String,
    /// One of `pending`, `replied`, `omitted`
    pub status: String,
    pub subject: String,
    /// Always present, `null` when no content was supplied
    pub content: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<FeedbackRecord> for FeedbackResponse {
    fn from(record: FeedbackRecord) -> Self {
        Self {
            id: record.id.into_uuid(),
            sender_name: record.sender_name,
            email: record.email,
            status: record.status.to_string(),
            subject: record.subject,
            content: record.content,
            created_at: format_datetime(&record.created_at),
            updated_at: format_datetime(&record.updated_at),
        }
    }
}

/// Create feedback request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    #[validate(required(message = "is required"), length(max = 100))]
    pub sender_name: Option<String>,

    #[validate(required(message = "is required"), length(max = 100))]
    pub email: Option<String>,

    #[validate(required(message = "is required"))]
    pub subject: Option<String>,

    pub content: Option<String>,
}

/// Update feedback request. Absent or `null` fields keep their value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackRequest {
    #[validate(length(max = 100))]
    pub sender_name: Option<String>,

    #[validate(length(max = 100))]
    pub email: Option<String>,

    pub subject: Option<String>,

    pub content: Option<String>,

    #[validate(custom = "validate_status")]
    pub status: Option<String>,
}

/// Query parameters for listing feedback
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedbackListQuery {
    /// Substring of the subject (case-sensitive)
    pub q: Option<String>,
    /// Exact status
    pub status: Option<String>,
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    status
        .parse::<FeedbackStatus>()
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("status");
            err.message = Some("must be one of pending, replied, omitted".into());
            err
        })
}

/// Feedback routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feedback", get(list_feedback).post(create_feedback))
        .route(
            "/feedback/:id",
            get(get_feedback)
                .put(update_feedback)
                .delete(delete_feedback),
        )
}

/// List feedback
///
/// Search by subject substring and exact status. Without filters every
/// record is returned, oldest first.
#[utoipa::path(
    get,
    path = "/api/feedback",
    tag = "feedback",
    params(FeedbackListQuery),
    responses(
        (status = 200, description = "Matching feedback", body = [FeedbackResponse]),
        (status = 400, description = "Unknown status value", body = ErrorResponse),
    )
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    ctx: RequestContext,
    ApiQuery(query): ApiQuery<FeedbackListQuery>,
) -> ApiResult<Json<Vec<FeedbackResponse>>> {
    let records = state
        .feedback_service
        .filter(&ctx, query.q.as_deref(), query.status.as_deref())
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Get feedback by ID
#[utoipa::path(
    get,
    path = "/api/feedback/{id}",
    tag = "feedback",
    params(
        ("id" = String, Path, description = "Feedback ID"),
    ),
    responses(
        (status = 200, description = "Feedback details", body = FeedbackResponse),
        (status = 404, description = "Feedback not found", body = ErrorResponse),
    )
)]
pub async fn get_feedback(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<Json<FeedbackResponse>> {
    let record = state
        .feedback_service
        .get_detail_by_id(&ctx, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Feedback {} not found", id)))?;

    Ok(Json(record.into()))
}

/// Create feedback
///
/// New feedback always starts `pending`.
#[utoipa::path(
    post,
    path = "/api/feedback",
    tag = "feedback",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 200, description = "Feedback created", body = FeedbackResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(req): ValidatedJson<CreateFeedbackRequest>,
) -> ApiResult<Json<FeedbackResponse>> {
    let input = NewFeedback {
        sender_name: req.sender_name.unwrap_or_default(),
        email: req.email.unwrap_or_default(),
        subject: req.subject.unwrap_or_default(),
        content: req.content,
    };

    let record = state.feedback_service.create(&ctx, input).await?;

    Ok(Json(record.into()))
}

/// Update feedback
///
/// Merge the supplied fields over the stored record.
#[utoipa::path(
    put,
    path = "/api/feedback/{id}",
    tag = "feedback",
    params(
        ("id" = String, Path, description = "Feedback ID"),
    ),
    request_body = UpdateFeedbackRequest,
    responses(
        (status = 200, description = "Feedback updated", body = FeedbackResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or wrong credentials", body = ErrorResponse),
        (status = 404, description = "Feedback not found", body = ErrorResponse),
    ),
    security(
        ("basic_auth" = [])
    )
)]
pub async fn update_feedback(
    _operator: Operator,
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateFeedbackRequest>,
) -> ApiResult<Json<FeedbackResponse>> {
    let patch = FeedbackPatch {
        sender_name: req.sender_name,
        email: req.email,
        subject: req.subject,
        content: req.content,
        status: req.status,
    };

    let record = state.feedback_service.update_by_id(&ctx, &id, patch).await?;

    Ok(Json(record.into()))
}

/// Delete feedback
#[utoipa::path(
    delete,
    path = "/api/feedback/{id}",
    tag = "feedback",
    params(
        ("id" = String, Path, description = "Feedback ID"),
    ),
    responses(
        (status = 200, description = "Feedback deleted", body = MessageResponse),
        (status = 401, description = "Missing or wrong credentials", body = ErrorResponse),
        (status = 404, description = "Feedback not found", body = ErrorResponse),
    ),
    security(
        ("basic_auth" = [])
    )
)]
pub async fn delete_feedback(
    _operator: Operator,
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    state.feedback_service.delete_by_id(&ctx, &id).await?;

    Ok(MessageResponse::new("Feedback deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use feedback_desk_domain::FeedbackId;

    #[test]
    fn test_response_always_carries_content() {
        let now = Utc::now();
        let record = FeedbackRecord {
            id: FeedbackId::new(),
            sender_name: "Jane".into(),
            email: "jane@x.com".into(),
            status: FeedbackStatus::Pending,
            subject: "Hi".into(),
            content: None,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(FeedbackResponse::from(record)).unwrap();
        assert!(json["content"].is_null());
        assert_eq!(json["status"], "pending");
        assert_eq!(json["senderName"], "Jane");
        assert_eq!(json["createdAt"], json["updatedAt"]);
    }

    #[test]
    fn test_create_request_requires_fields() {
        let req: CreateFeedbackRequest =
            serde_json::from_str(r#"{"email":"a@b.c","subject":"s"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_rejects_unknown_status() {
        let req = UpdateFeedbackRequest {
            status: Some("archived".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateFeedbackRequest {
            status: Some("omitted".into()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
