//! The feedback record and the inputs that create and modify it.

use crate::identifiers::FeedbackId;
use crate::validation::{check_required_text, check_short_text, ValidationResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handling status of a feedback record.
///
/// Any status may move to any other; only the value set is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    /// Not yet handled
    #[default]
    Pending,
    /// An operator answered the sender
    Replied,
    /// An operator decided not to answer
    Omitted,
}

impl FeedbackStatus {
    /// Every accepted status, in declaration order.
    pub const ALL: [FeedbackStatus; 3] = [Self::Pending, Self::Replied, Self::Omitted];

    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Replied => "replied",
            Self::Omitted => "omitted",
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the accepted statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status '{0}': expected one of pending, replied, omitted")]
pub struct StatusParseError(pub String);

impl FromStr for FeedbackStatus {
    type Err = StatusParseError;

    /// Matching is exact: `"Pending"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

/// Parse an optional status filter taken from a query string.
///
/// An absent or empty value means "no filter".
pub fn parse_status_filter(raw: Option<&str>) -> Result<Option<FeedbackStatus>, StatusParseError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

/// A stored feedback message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Identifier assigned at creation
    pub id: FeedbackId,
    /// Name the sender gave
    pub sender_name: String,
    /// Contact address; the format is not checked
    pub email: String,
    /// Handling status
    pub status: FeedbackStatus,
    /// Subject line, the only field searched by text queries
    pub subject: String,
    /// Message body, distinct from an empty body when absent
    pub content: Option<String>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update
    pub updated_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Build a fresh `pending` record from a creation request.
    pub fn create(input: NewFeedback, now: DateTime<Utc>) -> Self {
        Self {
            id: FeedbackId::new(),
            sender_name: input.sender_name,
            email: input.email,
            status: FeedbackStatus::Pending,
            subject: input.subject,
            content: input.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied fields of `patch` over this record and refresh
    /// `updated_at`.
    ///
    /// The status is parsed before anything is changed, so a bad status
    /// leaves the record untouched.
    pub fn apply_patch(
        &mut self,
        patch: FeedbackPatch,
        now: DateTime<Utc>,
    ) -> Result<(), StatusParseError> {
        let status = patch.status.as_deref().map(str::parse).transpose()?;

        if let Some(sender_name) = patch.sender_name {
            self.sender_name = sender_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
        if let Some(content) = patch.content {
            self.content = Some(content);
        }
        if let Some(status) = status {
            self.status = status;
        }
        self.touch(now);
        Ok(())
    }

    /// Advance `updated_at` to `now`, or one microsecond past its current
    /// value when the clock has not moved forward.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    /// Whether `subject` contains `query`. Matching is case-sensitive.
    pub fn subject_contains(&self, query: &str) -> bool {
        self.subject.contains(query)
    }
}

/// Fields a client supplies when submitting feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    /// Sender name
    pub sender_name: String,
    /// Sender email
    pub email: String,
    /// Subject line
    pub subject: String,
    /// Optional message body
    #[serde(default)]
    pub content: Option<String>,
}

impl NewFeedback {
    /// Check the required fields.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        check_short_text(&mut result, "senderName", Some(&self.sender_name));
        check_short_text(&mut result, "email", Some(&self.email));
        check_required_text(&mut result, "subject", Some(&self.subject));
        result
    }
}

/// A partial update. `None` leaves the current value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPatch {
    /// New sender name
    pub sender_name: Option<String>,
    /// New email
    pub email: Option<String>,
    /// New subject
    pub subject: Option<String>,
    /// New body
    pub content: Option<String>,
    /// New status, still in its raw wire form
    pub status: Option<String>,
}

impl FeedbackPatch {
    /// Check every supplied field with the same rules as creation, plus the
    /// status value set.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if self.sender_name.is_some() {
            check_short_text(&mut result, "senderName", self.sender_name.as_deref());
        }
        if self.email.is_some() {
            check_short_text(&mut result, "email", self.email.as_deref());
        }
        if self.subject.is_some() {
            check_required_text(&mut result, "subject", self.subject.as_deref());
        }
        if let Some(status) = self.status.as_deref() {
            if let Err(e) = status.parse::<FeedbackStatus>() {
                result.add_error("status", e.to_string());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn sample() -> FeedbackRecord {
        FeedbackRecord::create(
            NewFeedback {
                sender_name: "Jane".into(),
                email: "jane@x.com".into(),
                subject: "Hi".into(),
                content: None,
            },
            at(0),
        )
    }

    #[test]
    fn test_create_defaults() {
        let record = sample();
        assert_eq!(record.status, FeedbackStatus::Pending);
        assert_eq!(record.created_at, record.updated_at);
        assert!(record.content.is_none());
    }

    #[test]
    fn test_apply_patch_merges_supplied_fields() {
        let mut record = sample();
        record
            .apply_patch(
                FeedbackPatch {
                    status: Some("replied".into()),
                    ..Default::default()
                },
                at(5),
            )
            .unwrap();

        assert_eq!(record.status, FeedbackStatus::Replied);
        assert_eq!(record.sender_name, "Jane");
        assert_eq!(record.subject, "Hi");
        assert_eq!(record.updated_at, at(5));
        assert_eq!(record.created_at, at(0));
    }

    #[test]
    fn test_apply_patch_rejects_bad_status_without_changes() {
        let mut record = sample();
        let before = record.clone();
        let err = record
            .apply_patch(
                FeedbackPatch {
                    subject: Some("Changed".into()),
                    status: Some("archived".into()),
                    ..Default::default()
                },
                at(5),
            )
            .unwrap_err();

        assert_eq!(err, StatusParseError("archived".into()));
        assert_eq!(record, before);
    }

    #[test]
    fn test_touch_is_strictly_increasing() {
        let mut record = sample();
        record.touch(at(0));
        assert_eq!(record.updated_at, at(0) + Duration::microseconds(1));

        record.touch(at(-10));
        assert_eq!(record.updated_at, at(0) + Duration::microseconds(2));
    }

    #[test]
    fn test_new_feedback_validation() {
        let mut input = NewFeedback {
            sender_name: "".into(),
            email: "jane@x.com".into(),
            subject: " ".into(),
            content: None,
        };
        let result = input.validate();
        assert_eq!(result.errors.len(), 2);

        input.sender_name = "Jane".into();
        input.subject = "Hi".into();
        assert!(input.validate().valid);
    }

    #[test]
    fn test_patch_validation() {
        assert!(FeedbackPatch::default().validate().valid);

        let patch = FeedbackPatch {
            email: Some(String::new()),
            status: Some("Pending".into()),
            ..Default::default()
        };
        let result = patch.validate();
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[1].path, "status");
    }

    #[test]
    fn test_status_filter() {
        assert_eq!(parse_status_filter(None), Ok(None));
        assert_eq!(parse_status_filter(Some("")), Ok(None));
        assert_eq!(
            parse_status_filter(Some("omitted")),
            Ok(Some(FeedbackStatus::Omitted))
        );
        assert!(parse_status_filter(Some("closed")).is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["senderName"], "Jane");
        assert_eq!(json["status"], "pending");
        assert!(json["content"].is_null());
        assert!(json.get("createdAt").is_some());
    }
}
