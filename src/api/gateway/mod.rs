//! Gateways for talking to the feedback service.
//!
//! The trait-based design enables mocking in tests while
//! [`HttpFeedbackGateway`] handles real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;

pub use client::{DEFAULT_API_URL, HttpFeedbackGateway, REQUEST_TIMEOUT};

use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::models::{AnalyticsSnapshot, FeedbackItem, FixSentimentsReport, NewFeedback};
use crate::api::query::FeedbackQuery;

/// Gateway that can read and write feedback records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackGateway: Send + Sync {
    /// Submit a new feedback record (`POST /feedback`).
    async fn create_feedback(&self, feedback: &NewFeedback) -> Result<FeedbackItem, ApiError>;

    /// List feedback records filtered and sorted by the backend
    /// (`GET /feedback`).
    async fn list_feedback(&self, query: &FeedbackQuery) -> Result<Vec<FeedbackItem>, ApiError>;

    /// Fetch a single feedback record (`GET /feedback/{id}`).
    async fn feedback_by_id(&self, id: u64) -> Result<FeedbackItem, ApiError>;

    /// Fetch the aggregate analytics snapshot (`GET /feedback/analytics`).
    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApiError>;

    /// Ask the backend to recompute stored sentiments
    /// (`PUT /feedback/fix-sentiments`).
    async fn fix_sentiments(&self) -> Result<FixSentimentsReport, ApiError>;
}

/// Gateway used when no backend client has been configured.
///
/// Every call fails with [`ApiError::Configuration`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredGateway;

impl UnconfiguredGateway {
    fn error() -> ApiError {
        ApiError::Configuration {
            message: "feedback service client not configured".to_owned(),
        }
    }
}

#[async_trait]
impl FeedbackGateway for UnconfiguredGateway {
    async fn create_feedback(&self, _feedback: &NewFeedback) -> Result<FeedbackItem, ApiError> {
        Err(Self::error())
    }

    async fn list_feedback(&self, _query: &FeedbackQuery) -> Result<Vec<FeedbackItem>, ApiError> {
        Err(Self::error())
    }

    async fn feedback_by_id(&self, _id: u64) -> Result<FeedbackItem, ApiError> {
        Err(Self::error())
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApiError> {
        Err(Self::error())
    }

    async fn fix_sentiments(&self) -> Result<FixSentimentsReport, ApiError> {
        Err(Self::error())
    }
}
