//! Test fixtures generating feedback data with realistic values.

use fake::{
    faker::{
        internet::en::FreeEmail,
        lorem::en::{Paragraph, Sentence},
        name::en::Name,
    },
    Fake,
};
use feedback_desk_common::now_utc;
use feedback_desk_domain::{FeedbackId, FeedbackRecord, FeedbackStatus, NewFeedback};

/// Create a valid creation request with random values
pub fn create_test_new_feedback() -> NewFeedback {
    NewFeedback {
        sender_name: Name().fake(),
        email: FreeEmail().fake(),
        subject: Sentence(2..6).fake(),
        content: Some(Paragraph(1..3).fake()),
    }
}

/// Create a stored record with random values
pub fn create_test_feedback() -> FeedbackRecord {
    create_test_feedback_with_status(FeedbackStatus::Pending)
}

/// Create a stored record with a specific status
pub fn create_test_feedback_with_status(status: FeedbackStatus) -> FeedbackRecord {
    let input = create_test_new_feedback();
    let now = now_utc();
    FeedbackRecord {
        id: FeedbackId::new(),
        sender_name: input.sender_name,
        email: input.email,
        status,
        subject: input.subject,
        content: input.content,
        created_at: now,
        updated_at: now,
    }
}

/// Create `count` random creation requests
pub fn create_test_new_feedback_batch(count: usize) -> Vec<NewFeedback> {
    (0..count).map(|_| create_test_new_feedback()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_pass_validation() {
        for input in create_test_new_feedback_batch(20) {
            assert!(input.validate().valid, "{input:?}");
        }
    }

    #[test]
    fn test_fixture_status() {
        let record = create_test_feedback_with_status(FeedbackStatus::Omitted);
        assert_eq!(record.status, FeedbackStatus::Omitted);
    }
}
