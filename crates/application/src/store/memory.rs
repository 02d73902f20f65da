//! In-memory feedback store
//!
//! Backs the test suites and local runs without a database. Records keep
//! insertion order, which is also creation order.

use super::{FeedbackQuery, FeedbackStore, StoreError, StoreResult};
use async_trait::async_trait;
use feedback_desk_domain::{FeedbackId, FeedbackRecord};
use indexmap::IndexMap;
use parking_lot::RwLock;

/// Feedback store kept in process memory.
///
/// Every operation takes the lock once, so single-record writes are atomic.
#[derive(Debug, Default)]
pub struct InMemoryFeedbackStore {
    records: RwLock<IndexMap<FeedbackId, FeedbackRecord>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn create(&self, record: &FeedbackRecord) -> StoreResult<FeedbackRecord> {
        let mut records = self.records.write();
        if records.contains_key(&record.id) {
            return Err(StoreError::Unavailable(format!(
                "duplicate feedback id {}",
                record.id
            )));
        }
        records.insert(record.id, record.clone());
        Ok(record.clone())
    }

    async fn get_by_id(&self, id: FeedbackId) -> StoreResult<Option<FeedbackRecord>> {
        Ok(self.records.read().get(&id).cloned())
    }

    async fn search(&self, query: &FeedbackQuery) -> StoreResult<Vec<FeedbackRecord>> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    async fn update(&self, record: &FeedbackRecord) -> StoreResult<FeedbackRecord> {
        let mut records = self.records.write();
        let slot = records
            .get_mut(&record.id)
            .ok_or(StoreError::NotFound(record.id))?;
        // created_at is immutable once stored
        let created_at = slot.created_at;
        *slot = FeedbackRecord {
            created_at,
            ..record.clone()
        };
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: FeedbackId) -> StoreResult<()> {
        self.records
            .write()
            .shift_remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
