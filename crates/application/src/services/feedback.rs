//! Feedback Service
//!
//! Business rules for the feedback resource: defaulting on creation, partial
//! updates, and existence checks before writes.

use super::ServiceContext;
use crate::store::{FeedbackQuery, FeedbackStore, StoreError};
use crate::{ApplicationError, ApplicationResult};
use feedback_desk_common::now_utc;
use feedback_desk_domain::{
    parse_status_filter, FeedbackId, FeedbackPatch, FeedbackRecord, NewFeedback,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Feedback service implementation
pub struct FeedbackService<S>
where
    S: FeedbackStore,
{
    store: Arc<S>,
}

impl<S> Clone for FeedbackService<S>
where
    S: FeedbackStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> FeedbackService<S>
where
    S: FeedbackStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Submit new feedback. The record starts `pending`.
    #[instrument(skip(self, ctx, input), fields(correlation_id = %ctx.correlation_id))]
    pub async fn create(
        &self,
        ctx: &ServiceContext,
        input: NewFeedback,
    ) -> ApplicationResult<FeedbackRecord> {
        let validation = input.validate();
        if !validation.valid {
            return Err(ApplicationError::InvalidInput(validation.summary()));
        }

        let record = FeedbackRecord::create(input, now_utc());
        let stored = self.store.create(&record).await?;

        info!(feedback_id = %stored.id, "Feedback created");
        Ok(stored)
    }

    /// Search by subject substring and exact status.
    ///
    /// Empty or absent arguments do not filter.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn filter(
        &self,
        ctx: &ServiceContext,
        text: Option<&str>,
        status: Option<&str>,
    ) -> ApplicationResult<Vec<FeedbackRecord>> {
        let status =
            parse_status_filter(status).map_err(|e| ApplicationError::InvalidInput(e.to_string()))?;
        let query = FeedbackQuery {
            text: text.map(str::to_string),
            status,
        };

        let records = self.store.search(&query).await?;
        debug!(count = records.len(), "Feedback search completed");
        Ok(records)
    }

    /// Point lookup. `Ok(None)` when nothing is stored under `id`, including
    /// when `id` is not a valid identifier.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn get_detail_by_id(
        &self,
        ctx: &ServiceContext,
        id: &str,
    ) -> ApplicationResult<Option<FeedbackRecord>> {
        match parse_id(id) {
            Some(id) => Ok(self.store.get_by_id(id).await?),
            None => Ok(None),
        }
    }

    /// Merge the supplied fields over the stored record.
    #[instrument(skip(self, ctx, patch), fields(correlation_id = %ctx.correlation_id))]
    pub async fn update_by_id(
        &self,
        ctx: &ServiceContext,
        id: &str,
        patch: FeedbackPatch,
    ) -> ApplicationResult<FeedbackRecord> {
        let validation = patch.validate();
        if !validation.valid {
            return Err(ApplicationError::InvalidInput(validation.summary()));
        }

        let mut record = self.require(id).await?;
        record
            .apply_patch(patch, now_utc())
            .map_err(|e| ApplicationError::InvalidInput(e.to_string()))?;

        // A concurrent delete between the read and this write surfaces as NotFound
        let updated = self.store.update(&record).await?;

        info!(feedback_id = %updated.id, status = %updated.status, "Feedback updated");
        Ok(updated)
    }

    /// Remove a stored record.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn delete_by_id(&self, ctx: &ServiceContext, id: &str) -> ApplicationResult<()> {
        let record = self.require(id).await?;
        self.store.delete_by_id(record.id).await?;

        info!(feedback_id = %record.id, "Feedback deleted");
        Ok(())
    }

    /// Whether the backing store answers.
    pub async fn is_ready(&self) -> ApplicationResult<()> {
        self.store.ping().await.map_err(ApplicationError::from)
    }

    async fn require(&self, id: &str) -> ApplicationResult<FeedbackRecord> {
        let not_found = || ApplicationError::NotFound(format!("Feedback {}", id));
        let id = parse_id(id).ok_or_else(not_found)?;
        match self.store.get_by_id(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) | Err(StoreError::NotFound(_)) => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_id(raw: &str) -> Option<FeedbackId> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryFeedbackStore;

    fn ctx() -> ServiceContext {
        ServiceContext::new("test")
    }

    fn service() -> FeedbackService<InMemoryFeedbackStore> {
        FeedbackService::new(Arc::new(InMemoryFeedbackStore::new()))
    }

    #[tokio::test]
    async fn test_unparseable_id_reads_as_absent() {
        let svc = service();
        assert_eq!(svc.get_detail_by_id(&ctx(), "not-a-uuid").await, Ok(None));
    }

    #[tokio::test]
    async fn test_unparseable_id_on_write_is_not_found() {
        let svc = service();
        let err = svc.delete_by_id(&ctx(), "42").await.unwrap_err();
        assert_eq!(err.http_status(), 404);

        let err = svc
            .update_by_id(&ctx(), "42", FeedbackPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 404);
    }

    #[tokio::test]
    async fn test_invalid_patch_wins_over_missing_record() {
        let svc = service();
        let patch = FeedbackPatch {
            status: Some("archived".into()),
            ..Default::default()
        };
        let err = svc
            .update_by_id(&ctx(), &FeedbackId::new().to_string(), patch)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }
}
