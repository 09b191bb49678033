//! Feedback list component.
//!
//! Renders the filter bar, search box, summary counts, a scrollable window
//! of records with cursor highlighting, and a detail pane for the selected
//! record.

use crate::api::models::{FeedbackItem, format_timestamp, rating_label};
use crate::tui::state::ListState;

use super::star_rating::{DEFAULT_MAX_STARS, render_stars};
use super::text_truncate::{clip_lines, truncate_to_width, wrap_to_width};

/// Default visible height for the record window.
const DEFAULT_VISIBLE_HEIGHT: usize = 10;

/// Rows used by the filter bar, search box, summary, and separator.
pub const LIST_CHROME_HEIGHT: usize = 4;

/// Rows reserved for the detail pane, including its separator.
pub const DETAIL_HEIGHT: usize = 7;

/// Context for rendering the list view.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackListViewContext<'a> {
    /// List state to render.
    pub state: &'a ListState,
    /// Rows available for records.
    pub visible_height: usize,
    /// Maximum line width in columns.
    pub max_width: usize,
}

/// Component for displaying the feedback list.
#[derive(Debug, Clone)]
pub struct FeedbackListComponent {
    visible_height: usize,
}

impl Default for FeedbackListComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackListComponent {
    /// Creates a new list component.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visible_height: DEFAULT_VISIBLE_HEIGHT,
        }
    }

    /// Updates the visible height for paging.
    pub const fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
    }

    /// Returns the visible height.
    #[must_use]
    pub const fn visible_height(&self) -> usize {
        self.visible_height
    }

    /// Renders the list view as a string.
    #[must_use]
    pub fn view(&self, ctx: &FeedbackListViewContext<'_>) -> String {
        let state = ctx.state;
        let mut lines = vec![
            format!("{}", state.query),
            search_line(state),
            summary_line(state),
            String::new(),
        ];

        let visible_height = if ctx.visible_height > 0 {
            ctx.visible_height
        } else {
            self.visible_height
        };
        lines.extend(Self::record_lines(state, visible_height));

        if let Some(selected) = state.selected() {
            lines.push(String::new());
            lines.extend(detail_lines(selected, ctx.max_width));
        }

        let mut output = String::new();
        for line in lines {
            output.push_str(&truncate_to_width(&line, ctx.max_width));
            output.push('\n');
        }
        output
    }

    fn record_lines(state: &ListState, visible_height: usize) -> Vec<String> {
        if state.visible_count() == 0 {
            let message = if state.loading {
                "  Loading feedback..."
            } else if state.items().is_empty() {
                "  No feedback yet."
            } else {
                "  No feedback matches the current search."
            };
            return vec![message.to_owned()];
        }

        state
            .visible_items()
            .into_iter()
            .enumerate()
            .skip(state.scroll_offset)
            .take(visible_height)
            .map(|(position, item)| {
                let prefix = if position == state.cursor_position {
                    ">"
                } else {
                    " "
                };
                format_record_line(item, prefix)
            })
            .collect()
    }
}

fn search_line(state: &ListState) -> String {
    if state.editing_search {
        format!("Search: {}_  (Enter/Esc to finish)", state.search)
    } else if state.search.is_empty() {
        "Search: (press / to search)".to_owned()
    } else {
        format!("Search: {}", state.search)
    }
}

fn summary_line(state: &ListState) -> String {
    let counts = state.summary();
    let updated = state
        .last_updated
        .map(|when| format!("  Last updated: {}", when.format("%H:%M:%S")))
        .unwrap_or_default();
    format!(
        "Total: {}  Positive: {}  Negative: {}  Neutral: {}{updated}",
        counts.total, counts.positive, counts.negative, counts.neutral
    )
}

fn format_record_line(item: &FeedbackItem, prefix: &str) -> String {
    let date = item
        .created_at
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_default();
    format!(
        "{prefix} {} {:<16} {:<9} {date:<17} {}",
        render_stars(item.rating, DEFAULT_MAX_STARS),
        truncate_to_width(&item.name, 16),
        item.display_sentiment().display_name(),
        item.message.lines().next().unwrap_or_default()
    )
}

fn detail_lines(item: &FeedbackItem, max_width: usize) -> Vec<String> {
    let contact = item
        .contact_email()
        .map(|email| format!(" <{email}>"))
        .unwrap_or_default();
    let mut lines = vec![
        format!("{}{contact}", item.name),
        format!(
            "{} {}  Sentiment: {}",
            render_stars(item.rating, DEFAULT_MAX_STARS),
            rating_label(item.rating),
            item.display_sentiment().display_name()
        ),
    ];
    let mut message = wrap_to_width(&item.message, max_width.saturating_sub(2).max(1));
    clip_lines(&mut message, DETAIL_HEIGHT.saturating_sub(3));
    lines.extend(message.into_iter().map(|line| format!("  {line}")));
    lines
}
