//! Analytics dashboard component.
//!
//! Renders headline cards, horizontal bar charts for the sentiment and
//! rating distributions, recent feedback, and the outcome of the last
//! "fix sentiments" run.

use crate::api::models::{AnalyticsSnapshot, fallback_sentiment, format_timestamp};
use crate::tui::state::{DashboardCards, DashboardState, FixOutcome, rating_bars, sentiment_slices};

use super::star_rating::{DEFAULT_MAX_STARS, render_stars};
use super::text_truncate::truncate_to_width;

const BAR_WIDTH: u64 = 30;
const BAR_CHAR: char = '█';
const CHART_LABEL_WIDTH: usize = 10;

/// Context for rendering the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct DashboardViewContext<'a> {
    /// Dashboard state to render.
    pub state: &'a DashboardState,
    /// Maximum line width in columns.
    pub max_width: usize,
}

/// Component for the analytics dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardComponent;

impl DashboardComponent {
    /// Creates a new dashboard component.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the dashboard as a string.
    #[must_use]
    pub fn view(&self, ctx: &DashboardViewContext<'_>) -> String {
        let state = ctx.state;
        let mut lines = vec![header_line(state)];

        if let Some(outcome) = &state.fix_outcome {
            lines.push(fix_outcome_line(outcome));
        }
        lines.push(String::new());

        match &state.snapshot {
            Some(snapshot) => lines.extend(snapshot_lines(snapshot)),
            None if state.loading => lines.push("  Loading analytics...".to_owned()),
            None if state.error.is_some() => {
                lines.push("  Analytics unavailable. Press r to retry.".to_owned());
            }
            None => lines.push("  No data to display.".to_owned()),
        }

        let mut output = String::new();
        for line in lines {
            output.push_str(&truncate_to_width(&line, ctx.max_width));
            output.push('\n');
        }
        output
    }
}

fn header_line(state: &DashboardState) -> String {
    let action = if state.fixing {
        "[Fixing sentiments...]"
    } else {
        "x: fix sentiments"
    };
    let updated = state
        .last_updated
        .map(|when| format!("Last updated: {}  ", when.format("%H:%M:%S")))
        .unwrap_or_default();
    format!("Analytics dashboard  {updated}{action}")
}

fn fix_outcome_line(outcome: &FixOutcome) -> String {
    match outcome {
        FixOutcome::Updated(count) => {
            format!("Sentiments fixed for {count} feedback records. (Esc to dismiss)")
        }
        FixOutcome::Failed(message) => {
            format!("Failed to fix sentiments: {message} (Esc to dismiss)")
        }
    }
}

fn snapshot_lines(snapshot: &AnalyticsSnapshot) -> Vec<String> {
    let cards = DashboardCards::from_snapshot(snapshot);
    let mut lines = vec![
        format!(
            "Total: {}   Average rating: {}   Positive: {}   Neutral: {}   Negative: {}",
            cards.total, cards.average_rating, cards.positive, cards.neutral, cards.negative
        ),
        String::new(),
        "Sentiment distribution".to_owned(),
    ];

    let slices = sentiment_slices(snapshot);
    let slice_max = slices.iter().map(|slice| slice.value).max().unwrap_or(0);
    if slices.is_empty() {
        lines.push("  (none)".to_owned());
    }
    for slice in &slices {
        lines.push(format!(
            "  {:<CHART_LABEL_WIDTH$} {} {} ({}%)",
            slice.label,
            bar(slice.value, slice_max),
            slice.value,
            slice.percent
        ));
    }

    lines.push(String::new());
    lines.push("Rating distribution".to_owned());
    let bars = rating_bars(snapshot);
    let bar_max = bars.iter().map(|rating| rating.count).max().unwrap_or(0);
    if bars.is_empty() {
        lines.push("  (none)".to_owned());
    }
    for rating in &bars {
        lines.push(format!(
            "  {:<CHART_LABEL_WIDTH$} {} {}",
            rating.label,
            bar(rating.count, bar_max),
            rating.count
        ));
    }

    lines.push(String::new());
    lines.push("Recent feedback".to_owned());
    if snapshot.recent_feedback.is_empty() {
        lines.push("  (none)".to_owned());
    }
    for recent in &snapshot.recent_feedback {
        let sentiment = recent
            .sentiment
            .clone()
            .unwrap_or_else(|| fallback_sentiment(recent.rating));
        let date = recent
            .created_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_default();
        lines.push(format!(
            "  {} {:<16} {:<9} {date}",
            render_stars(recent.rating, DEFAULT_MAX_STARS),
            truncate_to_width(&recent.name, 16),
            sentiment.display_name()
        ));
    }
    lines
}

/// Scales `value` against `max` to at most `BAR_WIDTH` cells.
fn bar(value: u64, max: u64) -> String {
    let cells = value
        .saturating_mul(BAR_WIDTH)
        .checked_div(max)
        .unwrap_or(0);
    let filled = usize::try_from(cells).unwrap_or(0);
    let visible = if value > 0 { filled.max(1) } else { 0 };
    std::iter::repeat_n(BAR_CHAR, visible).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::{fixture, rstest};

    use super::{DashboardComponent, DashboardViewContext, bar};
    use crate::api::models::{AnalyticsSnapshot, RecentFeedback, Sentiment};
    use crate::tui::state::{DashboardState, FixOutcome};

    #[fixture]
    fn loaded_state() -> DashboardState {
        let mut state = DashboardState::default();
        let request = state.begin_fetch();
        state.apply_snapshot(
            request,
            AnalyticsSnapshot {
                total_feedback: 4,
                average_rating: 3.75,
                sentiment_distribution: BTreeMap::from([
                    ("positif".to_owned(), 3),
                    ("negatif".to_owned(), 1),
                ]),
                rating_distribution: BTreeMap::from([
                    ("2".to_owned(), 1),
                    ("4".to_owned(), 1),
                    ("5".to_owned(), 2),
                ]),
                recent_feedback: vec![RecentFeedback {
                    id: 4,
                    name: "Ani".to_owned(),
                    rating: 5,
                    sentiment: Some(Sentiment::Positif),
                    created_at: None,
                }],
            },
        );
        state
    }

    fn render(state: &DashboardState) -> String {
        DashboardComponent::new().view(&DashboardViewContext {
            state,
            max_width: 120,
        })
    }

    #[rstest]
    fn renders_cards_charts_and_recent(loaded_state: DashboardState) {
        let output = render(&loaded_state);

        assert!(output.contains(
            "Total: 4   Average rating: 3.75   Positive: 3   Neutral: 0   Negative: 1"
        ));
        assert!(output.contains("Negatif"));
        assert!(output.contains("3 (75%)"));
        assert!(output.contains("5 stars"));
        assert!(output.contains("★★★★★ Ani"));
    }

    #[rstest]
    #[case::updated(FixOutcome::Updated(0), "Sentiments fixed for 0 feedback records.")]
    #[case::failed(
        FixOutcome::Failed("fix sentiments failed: boom".to_owned()),
        "Failed to fix sentiments: fix sentiments failed: boom"
    )]
    fn renders_fix_outcome(
        mut loaded_state: DashboardState,
        #[case] outcome: FixOutcome,
        #[case] expected: &str,
    ) {
        loaded_state.fix_outcome = Some(outcome);

        assert!(render(&loaded_state).contains(expected));
    }

    #[rstest]
    fn disables_action_while_fixing(mut loaded_state: DashboardState) {
        loaded_state.fixing = true;

        let output = render(&loaded_state);

        assert!(output.contains("[Fixing sentiments...]"));
        assert!(!output.contains("x: fix sentiments"));
    }

    #[test]
    fn renders_placeholder_before_first_snapshot() {
        let mut state = DashboardState::default();
        state.begin_fetch();

        assert!(render(&state).contains("Loading analytics..."));
    }

    #[rstest]
    #[case::full(10, 10, 30)]
    #[case::half(5, 10, 15)]
    #[case::tiny_but_visible(1, 1000, 1)]
    #[case::zero(0, 10, 0)]
    #[case::empty_chart(0, 0, 0)]
    fn bars_scale_to_largest_value(#[case] value: u64, #[case] max: u64, #[case] cells: usize) {
        assert_eq!(bar(value, max).chars().count(), cells);
    }
}
