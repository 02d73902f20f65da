//! Feedback Store
//!
//! The persistence port the service depends on. The service never sees a
//! driver error: implementations report only [`StoreError::NotFound`] for
//! writes against a missing id and [`StoreError::Unavailable`] for
//! everything else.

mod memory;

pub use memory::InMemoryFeedbackStore;

use async_trait::async_trait;
use feedback_desk_domain::{FeedbackId, FeedbackRecord, FeedbackStatus};
use thiserror::Error;

/// Errors surfaced by a [`FeedbackStore`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An update or delete targeted an id with no stored record
    #[error("feedback {0} not found")]
    NotFound(FeedbackId),

    /// Connectivity or storage failure
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Search predicate, already validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackQuery {
    /// Case-sensitive substring of `subject`; empty or absent matches all
    pub text: Option<String>,
    /// Exact status to keep
    pub status: Option<FeedbackStatus>,
}

impl FeedbackQuery {
    /// Text filter, with the empty string treated as absent.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Whether `record` satisfies every present filter.
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        self.text().map_or(true, |t| record.subject_contains(t))
            && self.status.map_or(true, |s| record.status == s)
    }
}

/// Persistence capability set for feedback records.
///
/// `search` returns records ordered by creation time, oldest first, with the
/// id as tie breaker.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Persist a fully populated record.
    async fn create(&self, record: &FeedbackRecord) -> StoreResult<FeedbackRecord>;

    /// Point lookup; absence is `Ok(None)`.
    async fn get_by_id(&self, id: FeedbackId) -> StoreResult<Option<FeedbackRecord>>;

    /// Records matching `query`.
    async fn search(&self, query: &FeedbackQuery) -> StoreResult<Vec<FeedbackRecord>>;

    /// Overwrite every mutable field of an existing record.
    async fn update(&self, record: &FeedbackRecord) -> StoreResult<FeedbackRecord>;

    /// Remove a record.
    async fn delete_by_id(&self, id: FeedbackId) -> StoreResult<()>;

    /// Readiness check.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_desk_domain::NewFeedback;
    use feedback_desk_common::now_utc;

    fn record(subject: &str) -> FeedbackRecord {
        FeedbackRecord::create(
            NewFeedback {
                sender_name: "Jane".into(),
                email: "jane@x.com".into(),
                subject: subject.into(),
                content: None,
            },
            now_utc(),
        )
    }

    #[test]
    fn test_query_matching() {
        let r = record("Hello World");

        assert!(FeedbackQuery::default().matches(&r));
        assert!(FeedbackQuery { text: Some(String::new()), status: None }.matches(&r));
        assert!(FeedbackQuery { text: Some("lo W".into()), status: None }.matches(&r));
        assert!(!FeedbackQuery { text: Some("hello".into()), status: None }.matches(&r));
        assert!(!FeedbackQuery {
            text: Some("Hello".into()),
            status: Some(FeedbackStatus::Replied)
        }
        .matches(&r));
    }
}
