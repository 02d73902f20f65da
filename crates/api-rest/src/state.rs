//! Application state and dependency injection.
//!
//! This module defines the shared application state that is passed
//! to all route handlers via Axum's state extraction.

use async_trait::async_trait;
use feedback_desk_application::{
    ApplicationError, CredentialGate, FeedbackService, FeedbackStore, InMemoryFeedbackStore,
    ServiceContext,
};
use feedback_desk_common::AppConfig;
use feedback_desk_domain::{FeedbackPatch, FeedbackRecord, NewFeedback};
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// Feedback service (type-erased)
    pub feedback_service: Arc<dyn FeedbackServiceTrait>,

    /// Basic-auth gate for write operations
    pub gate: Arc<CredentialGate>,
}

impl AppState {
    /// Create a new application state backed by an in-memory store.
    /// Suitable for development and testing
    pub fn new(config: AppConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryFeedbackStore::new()))
    }

    /// Create application state over a concrete store
    pub fn with_store<S>(config: AppConfig, store: Arc<S>) -> Self
    where
        S: FeedbackStore + 'static,
    {
        Self::with_service(config, FeedbackService::new(store))
    }

    /// Create application state with a custom service implementation
    pub fn with_service<F>(config: AppConfig, feedback_service: F) -> Self
    where
        F: FeedbackServiceTrait + 'static,
    {
        let gate = CredentialGate::from_config(&config.auth);

        Self {
            config: Arc::new(config),
            feedback_service: Arc::new(feedback_service),
            gate: Arc::new(gate),
        }
    }
}

// ============================================================================
// SERVICE TRAITS (Type-erased interfaces for route handlers)
// ============================================================================

/// Type-erased feedback service trait
#[async_trait]
pub trait FeedbackServiceTrait: Send + Sync {
    async fn create(
        &self,
        ctx: &ServiceContext,
        input: NewFeedback,
    ) -> Result<FeedbackRecord, ApplicationError>;

    async fn filter(
        &self,
        ctx: &ServiceContext,
        text: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<FeedbackRecord>, ApplicationError>;

    async fn get_detail_by_id(
        &self,
        ctx: &ServiceContext,
        id: &str,
    ) -> Result<Option<FeedbackRecord>, ApplicationError>;

    async fn update_by_id(
        &self,
        ctx: &ServiceContext,
        id: &str,
        patch: FeedbackPatch,
    ) -> Result<FeedbackRecord, ApplicationError>;

    async fn delete_by_id(&self, ctx: &ServiceContext, id: &str) -> Result<(), ApplicationError>;

    async fn is_ready(&self) -> Result<(), ApplicationError>;
}

#[async_trait]
impl<S> FeedbackServiceTrait for FeedbackService<S>
where
    S: FeedbackStore + 'static,
{
    async fn create(
        &self,
        ctx: &ServiceContext,
        input: NewFeedback,
    ) -> Result<FeedbackRecord, ApplicationError> {
        FeedbackService::create(self, ctx, input).await
    }

    async fn filter(
        &self,
        ctx: &ServiceContext,
        text: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<FeedbackRecord>, ApplicationError> {
        FeedbackService::filter(self, ctx, text, status).await
    }

    async fn get_detail_by_id(
        &self,
        ctx: &ServiceContext,
        id: &str,
    ) -> Result<Option<FeedbackRecord>, ApplicationError> {
        FeedbackService::get_detail_by_id(self, ctx, id).await
    }

    async fn update_by_id(
        &self,
        ctx: &ServiceContext,
        id: &str,
        patch: FeedbackPatch,
    ) -> Result<FeedbackRecord, ApplicationError> {
        FeedbackService::update_by_id(self, ctx, id, patch).await
    }

    async fn delete_by_id(&self, ctx: &ServiceContext, id: &str) -> Result<(), ApplicationError> {
        FeedbackService::delete_by_id(self, ctx, id).await
    }

    async fn is_ready(&self) -> Result<(), ApplicationError> {
        FeedbackService::is_ready(self).await
    }
}
