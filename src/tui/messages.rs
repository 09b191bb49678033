//! Message types for the TUI update loop.
//!
//! Messages represent user actions, async command results, and system
//! events. Fetch completions carry the request number they were issued with
//! so that stale responses can be discarded.

use crate::api::error::ApiError;
use crate::api::models::{AnalyticsSnapshot, FeedbackItem, FixSentimentsReport, Sentiment};
use crate::api::query::SortKey;

use super::app::ActiveView;
use super::refresh::PollTarget;

/// Messages for the feedback TUI application.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Navigation
    /// Switch to another view.
    ShowView(ActiveView),
    /// Move cursor up one item.
    CursorUp,
    /// Move cursor down one item.
    CursorDown,
    /// Move cursor up one page.
    PageUp,
    /// Move cursor down one page.
    PageDown,
    /// Move cursor to first item.
    Home,
    /// Move cursor to last item.
    End,

    // Feedback form
    /// Move focus to the next form field.
    FocusNext,
    /// Move focus to the previous form field.
    FocusPrevious,
    /// Type a character into the focused text field.
    InsertChar(char),
    /// Delete the last character of the focused text field.
    DeleteChar,
    /// Preview the next star on the rating control.
    RatingHoverNext,
    /// Preview the previous star on the rating control.
    RatingHoverPrevious,
    /// Commit the previewed rating.
    RatingCommit,
    /// Commit a specific rating.
    RatingSelect(u8),
    /// Validate and submit the draft.
    SubmitRequested,
    /// The backend accepted the submission.
    SubmitSucceeded(FeedbackItem),
    /// The submission failed.
    SubmitFailed(String),

    // Feedback list
    /// Set the sentiment filter (`None` means all).
    SetSentimentFilter(Option<Sentiment>),
    /// Cycle the sentiment filter.
    CycleSentimentFilter,
    /// Set the rating filter (`None` means all).
    SetRatingFilter(Option<u8>),
    /// Cycle the rating filter.
    CycleRatingFilter,
    /// Set the sort key.
    SetSortKey(SortKey),
    /// Cycle the sort key.
    CycleSortKey,
    /// Toggle the sort direction.
    ToggleSortOrder,
    /// Start editing the search term.
    StartSearch,
    /// Stop editing the search term.
    FinishSearch,
    /// Append a character to the search term.
    SearchInput(char),
    /// Delete the last character of the search term.
    SearchBackspace,
    /// Replace the search term.
    SetSearch(String),
    /// Re-fetch the list now.
    ListRefreshRequested,
    /// A list fetch completed.
    ListLoaded {
        /// Request number the fetch was issued with.
        request: u64,
        /// Records returned by the backend.
        items: Vec<FeedbackItem>,
        /// Wall-clock latency in milliseconds.
        latency_ms: u64,
    },
    /// A list fetch failed.
    ListFailed {
        /// Request number the fetch was issued with.
        request: u64,
        /// Error to display.
        message: String,
    },

    // Dashboard
    /// Re-fetch the analytics snapshot now.
    DashboardRefreshRequested,
    /// An analytics fetch completed.
    AnalyticsLoaded {
        /// Request number the fetch was issued with.
        request: u64,
        /// Snapshot returned by the backend.
        snapshot: AnalyticsSnapshot,
        /// Wall-clock latency in milliseconds.
        latency_ms: u64,
    },
    /// An analytics fetch failed.
    AnalyticsFailed {
        /// Request number the fetch was issued with.
        request: u64,
        /// Error to display.
        message: String,
    },
    /// Run the sentiment maintenance action.
    FixSentimentsRequested,
    /// The maintenance action completed.
    FixSentimentsComplete(FixSentimentsReport),
    /// The maintenance action failed.
    FixSentimentsFailed(String),

    // Polling
    /// A view's refresh timer fired.
    PollTick(PollTarget),

    // Application lifecycle
    /// Startup message emitted immediately by `init()`.
    Initialized,
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Dismiss the current banner or leave the current mode.
    EscapePressed,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

/// Describes a failed request for display.
///
/// Failures before the backend answered get a hint to check that the
/// service is reachable.
#[must_use]
pub fn failure_text(error: &ApiError) -> String {
    if error.is_transport() {
        format!("{error} (is the feedback service running?)")
    } else {
        error.to_string()
    }
}

impl AppMsg {
    /// Creates a list failure message from an `ApiError`.
    #[must_use]
    pub fn list_failed(request: u64, error: &ApiError) -> Self {
        Self::ListFailed {
            request,
            message: failure_text(error),
        }
    }

    /// Creates an analytics failure message from an `ApiError`.
    #[must_use]
    pub fn analytics_failed(request: u64, error: &ApiError) -> Self {
        Self::AnalyticsFailed {
            request,
            message: failure_text(error),
        }
    }

    /// Returns `true` for cursor movement and view switching.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ShowView(_)
                | Self::CursorUp
                | Self::CursorDown
                | Self::PageUp
                | Self::PageDown
                | Self::Home
                | Self::End
        )
    }

    /// Returns `true` for feedback form messages.
    #[must_use]
    pub const fn is_form(&self) -> bool {
        matches!(
            self,
            Self::FocusNext
                | Self::FocusPrevious
                | Self::InsertChar(_)
                | Self::DeleteChar
                | Self::RatingHoverNext
                | Self::RatingHoverPrevious
                | Self::RatingCommit
                | Self::RatingSelect(_)
                | Self::SubmitRequested
                | Self::SubmitSucceeded(_)
                | Self::SubmitFailed(_)
        )
    }

    /// Returns `true` for feedback list messages.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(
            self,
            Self::SetSentimentFilter(_)
                | Self::CycleSentimentFilter
                | Self::SetRatingFilter(_)
                | Self::CycleRatingFilter
                | Self::SetSortKey(_)
                | Self::CycleSortKey
                | Self::ToggleSortOrder
                | Self::StartSearch
                | Self::FinishSearch
                | Self::SearchInput(_)
                | Self::SearchBackspace
                | Self::SetSearch(_)
                | Self::ListRefreshRequested
                | Self::ListLoaded { .. }
                | Self::ListFailed { .. }
        )
    }

    /// Returns `true` for dashboard messages.
    #[must_use]
    pub const fn is_dashboard(&self) -> bool {
        matches!(
            self,
            Self::DashboardRefreshRequested
                | Self::AnalyticsLoaded { .. }
                | Self::AnalyticsFailed { .. }
                | Self::FixSentimentsRequested
                | Self::FixSentimentsComplete(_)
                | Self::FixSentimentsFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{AppMsg, failure_text};
    use crate::api::error::ApiError;

    #[rstest]
    #[case::timeout(
        ApiError::Timeout { message: "GET /feedback".to_owned() },
        "request timed out: GET /feedback (is the feedback service running?)"
    )]
    #[case::network(
        ApiError::Network { message: "connection refused".to_owned() },
        "network error talking to the feedback service: connection refused (is the feedback service running?)"
    )]
    #[case::status(
        ApiError::Status { status: 503, message: "maintenance".to_owned() },
        "feedback service returned status 503: maintenance"
    )]
    fn failure_text_hints_only_for_transport_errors(
        #[case] error: ApiError,
        #[case] expected: &str,
    ) {
        assert_eq!(failure_text(&error), expected);
    }

    #[test]
    fn list_failure_carries_described_error() {
        let error = ApiError::Network {
            message: "connection refused".to_owned(),
        };

        let msg = AppMsg::list_failed(4, &error);

        assert!(matches!(
            msg,
            AppMsg::ListFailed { request: 4, ref message } if message.ends_with("(is the feedback service running?)")
        ));
    }
}
