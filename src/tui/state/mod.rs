//! State management for the feedback TUI.
//!
//! Each view owns its own state type; the chart helpers derive display
//! series from the dashboard snapshot.

mod charts;
mod dashboard;
mod feedback_list;
mod form;

pub use charts::{RatingBar, SentimentSlice, rating_bars, sentiment_slices};
pub use dashboard::{DashboardCards, DashboardState, FixOutcome};
pub use feedback_list::{ListState, SummaryCounts, matches_search};
pub use form::{
    DEFAULT_RATING, FormDraft, FormField, FormState, FormValidationError, MAX_RATING, SubmitStatus,
};
