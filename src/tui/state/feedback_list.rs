//! Filter, search, and cursor state for the feedback list.
//!
//! Server-side parameters live in a [`FeedbackQuery`]; the free-text search
//! term is applied locally to whatever the backend returned. The cursor is
//! tracked within the locally filtered set and retained across reloads by
//! record ID where possible.

use chrono::{DateTime, Local};

use crate::api::models::{FeedbackItem, Sentiment};
use crate::api::query::FeedbackQuery;
use crate::tui::refresh::{RefreshSubscription, RequestTracker};

/// Returns `true` when `item` contains `term` in its name, message, or
/// email, ignoring case. An empty term matches everything; whitespace in
/// the term is matched literally.
#[must_use]
pub fn matches_search(item: &FeedbackItem, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
    contains(&item.name)
        || contains(&item.message)
        || item.contact_email().is_some_and(contains)
}

/// Counts shown above the list, computed from the displayed records.
///
/// Only backend-assigned labels are counted per sentiment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    /// Records displayed.
    pub total: usize,
    /// Records labelled `positif`.
    pub positive: usize,
    /// Records labelled `negatif`.
    pub negative: usize,
    /// Records labelled `neutral`.
    pub neutral: usize,
}

impl SummaryCounts {
    /// Tallies the given records.
    #[must_use]
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a FeedbackItem>,
    {
        items.into_iter().fold(Self::default(), |mut counts, item| {
            counts.total = counts.total.saturating_add(1);
            match item.sentiment {
                Some(Sentiment::Positif) => counts.positive = counts.positive.saturating_add(1),
                Some(Sentiment::Negatif) => counts.negative = counts.negative.saturating_add(1),
                Some(Sentiment::Neutral) => counts.neutral = counts.neutral.saturating_add(1),
                Some(Sentiment::Other(_)) | None => {}
            }
            counts
        })
    }
}

/// State of the feedback list view.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Parameters sent to the backend.
    pub query: FeedbackQuery,
    /// Local free-text search term.
    pub search: String,
    /// Whether keystrokes currently edit the search term.
    pub editing_search: bool,
    /// Records from the last applied fetch, in backend order.
    items: Vec<FeedbackItem>,
    /// Indices into `items` that match the search term.
    visible: Vec<usize>,
    /// Cursor position within `visible`.
    pub cursor_position: usize,
    /// First visible row.
    pub scroll_offset: usize,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Error from the last failed fetch.
    pub error: Option<String>,
    /// When the last fetch was applied.
    pub last_updated: Option<DateTime<Local>>,
    /// Request numbering for stale-response detection.
    pub tracker: RequestTracker,
    /// Last refresh generation acted upon.
    pub subscription: RefreshSubscription,
}

impl ListState {
    /// Creates list state with the given parameters and search term.
    #[must_use]
    pub fn new(query: FeedbackQuery, search: String) -> Self {
        Self {
            query,
            search,
            ..Self::default()
        }
    }

    /// All records from the last applied fetch.
    #[must_use]
    pub fn items(&self) -> &[FeedbackItem] {
        &self.items
    }

    /// Records matching the search term, in backend order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&FeedbackItem> {
        self.visible
            .iter()
            .filter_map(|&index| self.items.get(index))
            .collect()
    }

    /// Number of records displayed.
    #[must_use]
    pub const fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Summary counts over the displayed records.
    #[must_use]
    pub fn summary(&self) -> SummaryCounts {
        SummaryCounts::from_items(self.visible.iter().filter_map(|&index| self.items.get(index)))
    }

    /// Record under the cursor.
    #[must_use]
    pub fn selected(&self) -> Option<&FeedbackItem> {
        self.visible
            .get(self.cursor_position)
            .and_then(|&index| self.items.get(index))
    }

    /// Marks a fetch as started and returns its request number.
    pub const fn begin_fetch(&mut self) -> u64 {
        self.loading = true;
        self.tracker.next()
    }

    /// Applies a fetch result if it belongs to the latest request.
    ///
    /// Returns `false` when the result is stale and was discarded.
    pub fn apply_items(&mut self, request: u64, items: Vec<FeedbackItem>) -> bool {
        if !self.tracker.is_current(request) {
            return false;
        }
        let selected_id = self.selected().map(|item| item.id);

        self.items = items;
        self.loading = false;
        self.error = None;
        self.last_updated = Some(Local::now());
        self.rebuild_visible();

        if let Some(position) = selected_id.and_then(|id| self.position_of(id)) {
            self.cursor_position = position;
        }
        self.clamp_cursor();
        true
    }

    /// Records a fetch failure if it belongs to the latest request.
    ///
    /// Previously loaded records stay on screen. Returns `false` when the
    /// failure is stale and was discarded.
    pub fn apply_failure(&mut self, request: u64, message: &str) -> bool {
        if !self.tracker.is_current(request) {
            return false;
        }
        self.loading = false;
        self.error = Some(message.to_owned());
        true
    }

    /// Replaces the search term and re-filters locally.
    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.rebuild_visible();
        self.clamp_cursor();
    }

    /// Recomputes the indices matching the search term.
    pub fn rebuild_visible(&mut self) {
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches_search(item, &self.search))
            .map(|(index, _)| index)
            .collect();
    }

    fn position_of(&self, id: u64) -> Option<usize> {
        self.visible
            .iter()
            .position(|&index| self.items.get(index).is_some_and(|item| item.id == id))
    }

    /// Clamps the cursor to the displayed records.
    pub const fn clamp_cursor(&mut self) {
        let count = self.visible.len();
        if count == 0 {
            self.cursor_position = 0;
            self.scroll_offset = 0;
        } else if self.cursor_position >= count {
            self.cursor_position = count.saturating_sub(1);
        }
    }

    /// Moves the cursor up by `step`, stopping at the first record.
    pub const fn move_up(&mut self, step: usize) {
        self.cursor_position = self.cursor_position.saturating_sub(step);
    }

    /// Moves the cursor down by `step`, stopping at the last record.
    pub fn move_down(&mut self, step: usize) {
        let max_index = self.visible.len().saturating_sub(1);
        self.cursor_position = self.cursor_position.saturating_add(step).min(max_index);
    }

    /// Moves the cursor to the first record.
    pub const fn home(&mut self) {
        self.cursor_position = 0;
        self.scroll_offset = 0;
    }

    /// Moves the cursor to the last record.
    pub const fn end(&mut self) {
        self.cursor_position = self.visible.len().saturating_sub(1);
    }

    /// Adjusts the scroll offset so the cursor stays within `visible_height`
    /// rows.
    pub const fn ensure_cursor_visible(&mut self, visible_height: usize) {
        if self.cursor_position < self.scroll_offset {
            self.scroll_offset = self.cursor_position;
            return;
        }
        let viewport_end = self.scroll_offset.saturating_add(visible_height);
        if self.cursor_position >= viewport_end {
            self.scroll_offset = self
                .cursor_position
                .saturating_sub(visible_height.saturating_sub(1));
        }
    }
}
