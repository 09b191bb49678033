//! Snapshot and maintenance-action state for the analytics dashboard.

use chrono::{DateTime, Local};

use crate::api::models::{AnalyticsSnapshot, Sentiment};
use crate::tui::refresh::{RefreshSubscription, RequestTracker};

/// Outcome of the last "fix sentiments" run, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    /// The backend reported how many records it updated.
    Updated(u64),
    /// The action failed.
    Failed(String),
}

/// Headline figures shown as cards.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCards {
    /// Total records stored by the backend.
    pub total: u64,
    /// Average rating, formatted to two decimals.
    pub average_rating: String,
    /// Records labelled `positif`.
    pub positive: u64,
    /// Records labelled `neutral`.
    pub neutral: u64,
    /// Records labelled `negatif`.
    pub negative: u64,
}

impl DashboardCards {
    /// Reads the cards from `snapshot`; missing labels count as zero.
    #[must_use]
    pub fn from_snapshot(snapshot: &AnalyticsSnapshot) -> Self {
        Self {
            total: snapshot.total_feedback,
            average_rating: format!("{:.2}", snapshot.average_rating),
            positive: snapshot.sentiment_count(&Sentiment::Positif),
            neutral: snapshot.sentiment_count(&Sentiment::Neutral),
            negative: snapshot.sentiment_count(&Sentiment::Negatif),
        }
    }
}

/// State of the dashboard view.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Last applied snapshot.
    pub snapshot: Option<AnalyticsSnapshot>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Error from the last failed fetch.
    pub error: Option<String>,
    /// When the last snapshot was applied.
    pub last_updated: Option<DateTime<Local>>,
    /// Whether the maintenance action is running.
    pub fixing: bool,
    /// Result of the last maintenance run.
    pub fix_outcome: Option<FixOutcome>,
    /// Request numbering for stale-response detection.
    pub tracker: RequestTracker,
    /// Last refresh generation acted upon.
    pub subscription: RefreshSubscription,
}

impl DashboardState {
    /// Marks a fetch as started and returns its request number.
    pub const fn begin_fetch(&mut self) -> u64 {
        self.loading = true;
        self.tracker.next()
    }

    /// Applies a snapshot if it belongs to the latest request.
    ///
    /// Returns `None` when the snapshot is stale and was discarded, otherwise
    /// the number of records added since the previous snapshot.
    pub fn apply_snapshot(&mut self, request: u64, snapshot: AnalyticsSnapshot) -> Option<u64> {
        if !self.tracker.is_current(request) {
            return None;
        }
        let previous_total = self
            .snapshot
            .as_ref()
            .map_or(snapshot.total_feedback, |previous| previous.total_feedback);
        let added = snapshot.total_feedback.saturating_sub(previous_total);

        self.snapshot = Some(snapshot);
        self.loading = false;
        self.error = None;
        self.last_updated = Some(Local::now());
        Some(added)
    }

    /// Records a fetch failure if it belongs to the latest request.
    ///
    /// Returns `false` when the failure is stale and was discarded.
    pub fn apply_failure(&mut self, request: u64, message: &str) -> bool {
        if !self.tracker.is_current(request) {
            return false;
        }
        self.loading = false;
        self.error = Some(message.to_owned());
        true
    }

    /// Cards for the current snapshot, if one is loaded.
    #[must_use]
    pub fn cards(&self) -> Option<DashboardCards> {
        self.snapshot.as_ref().map(DashboardCards::from_snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;

    use super::{DashboardCards, DashboardState};
    use crate::api::models::AnalyticsSnapshot;

    fn snapshot_with_total(total_feedback: u64) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            total_feedback,
            ..AnalyticsSnapshot::default()
        }
    }

    #[test]
    fn first_snapshot_reports_no_new_records() {
        let mut state = DashboardState::default();
        let request = state.begin_fetch();

        assert_eq!(state.apply_snapshot(request, snapshot_with_total(7)), Some(0));
        assert!(!state.loading);
    }

    #[rstest]
    #[case::grew(5, 8, 3)]
    #[case::unchanged(5, 5, 0)]
    #[case::shrank(5, 2, 0)]
    fn growth_between_snapshots_is_reported(
        #[case] before: u64,
        #[case] after: u64,
        #[case] expected: u64,
    ) {
        let mut state = DashboardState::default();
        let first = state.begin_fetch();
        state.apply_snapshot(first, snapshot_with_total(before));

        let second = state.begin_fetch();

        assert_eq!(
            state.apply_snapshot(second, snapshot_with_total(after)),
            Some(expected)
        );
    }

    #[test]
    fn stale_snapshot_is_discarded() {
        let mut state = DashboardState::default();
        let old = state.begin_fetch();
        let new = state.begin_fetch();

        assert!(state.apply_snapshot(new, snapshot_with_total(9)).is_some());
        assert_eq!(state.apply_snapshot(old, snapshot_with_total(1)), None);

        assert_eq!(
            state.snapshot.map(|snapshot| snapshot.total_feedback),
            Some(9)
        );
    }

    #[test]
    fn cards_default_missing_labels_to_zero() {
        let snapshot = AnalyticsSnapshot {
            total_feedback: 4,
            average_rating: 4.257,
            sentiment_distribution: BTreeMap::from([("positif".to_owned(), 4)]),
            ..AnalyticsSnapshot::default()
        };

        let cards = DashboardCards::from_snapshot(&snapshot);

        assert_eq!(cards.total, 4);
        assert_eq!(cards.average_rating, "4.26");
        assert_eq!(cards.positive, 4);
        assert_eq!(cards.neutral, 0);
        assert_eq!(cards.negative, 0);
    }
}
