//! Client for the patient feedback service.
//!
//! This module owns every HTTP interaction with the backend: the shared
//! client wrapper, wire models, listing parameters, and error mapping.
//! Sentiment classification and aggregation happen server-side; nothing here
//! computes them.

pub mod error;
pub mod gateway;
pub mod models;
pub mod query;

pub use error::ApiError;
pub use gateway::{
    DEFAULT_API_URL, FeedbackGateway, HttpFeedbackGateway, REQUEST_TIMEOUT, UnconfiguredGateway,
};
pub use models::{
    AnalyticsSnapshot, FeedbackItem, FixSentimentsReport, NewFeedback, RecentFeedback, Sentiment,
};
pub use query::{FeedbackQuery, SortKey, SortOrder};

#[cfg(test)]
pub use gateway::MockFeedbackGateway;
