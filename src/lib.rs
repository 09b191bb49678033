//! Ulasan library crate: a terminal client for a patient feedback service.
//!
//! The library wraps the service's HTTP API (submission, filtered listing,
//! analytics, and sentiment maintenance) and provides a bubbletea-rs
//! interface with a submission form, a searchable list, and an analytics
//! dashboard. Sentiment classification happens on the server; the client
//! only displays what the backend reports.

pub mod api;
pub mod config;
pub mod telemetry;
pub mod tui;

pub use api::{
    AnalyticsSnapshot, ApiError, FeedbackGateway, FeedbackItem, FeedbackQuery,
    FixSentimentsReport, HttpFeedbackGateway, NewFeedback, Sentiment, SortKey, SortOrder,
};
pub use config::{OperationMode, UlasanConfig};
