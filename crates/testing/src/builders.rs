//! Fluent builder pattern for constructing test data.

use chrono::{DateTime, Utc};
use feedback_desk_common::now_utc;
use feedback_desk_domain::{FeedbackId, FeedbackRecord, FeedbackStatus, NewFeedback};

/// Builder for creating FeedbackRecord test instances
#[derive(Clone)]
pub struct FeedbackRecordBuilder {
    id: FeedbackId,
    sender_name: String,
    email: String,
    status: FeedbackStatus,
    subject: String,
    content: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl FeedbackRecordBuilder {
    pub fn new() -> Self {
        Self {
            id: FeedbackId::new(),
            sender_name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            status: FeedbackStatus::Pending,
            subject: "Hi".to_string(),
            content: None,
            created_at: now_utc(),
            updated_at: None,
        }
    }

    pub fn with_id(mut self, id: FeedbackId) -> Self {
        self.id = id;
        self
    }

    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_status(mut self, status: FeedbackStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Defaults to `created_at`.
    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    pub fn build(self) -> FeedbackRecord {
        FeedbackRecord {
            id: self.id,
            sender_name: self.sender_name,
            email: self.email,
            status: self.status,
            subject: self.subject,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at.unwrap_or(self.created_at),
        }
    }
}

impl Default for FeedbackRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creation requests
#[derive(Clone)]
pub struct NewFeedbackBuilder {
    inner: NewFeedback,
}

impl NewFeedbackBuilder {
    pub fn new() -> Self {
        Self {
            inner: NewFeedback {
                sender_name: "Jane".to_string(),
                email: "jane@x.com".to_string(),
                subject: "Hi".to_string(),
                content: None,
            },
        }
    }

    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.inner.sender_name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.inner.email = email.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.inner.subject = subject.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.inner.content = Some(content.into());
        self
    }

    pub fn build(self) -> NewFeedback {
        self.inner
    }
}

impl Default for NewFeedbackBuilder {
    fn default() -> Self {
        Self::new()
    }
}
