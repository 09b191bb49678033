//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use ulasan::api::models::{AnalyticsSnapshot, FeedbackItem, FixSentimentsReport, format_timestamp};
use ulasan::tui::state::{DashboardCards, SummaryCounts, matches_search, rating_bars, sentiment_slices};
use ulasan::{ApiError, FeedbackQuery, Sentiment};

/// Writes the feedback listing, narrowed locally by `search`.
pub fn write_feedback_list<W: Write>(
    writer: &mut W,
    items: &[FeedbackItem],
    query: &FeedbackQuery,
    search: &str,
) -> Result<(), ApiError> {
    let shown: Vec<&FeedbackItem> = items
        .iter()
        .filter(|item| matches_search(item, search))
        .collect();

    writeln!(writer, "Feedback ({query})").map_err(|e| io_error(&e))?;
    if !search.is_empty() {
        writeln!(writer, "Search: \"{search}\"").map_err(|e| io_error(&e))?;
    }
    writeln!(writer).map_err(|e| io_error(&e))?;

    if shown.is_empty() {
        writeln!(writer, "  No feedback found.").map_err(|e| io_error(&e))?;
    }

    for item in &shown {
        let contact = item
            .contact_email()
            .map_or_else(String::new, |email| format!(" <{email}>"));
        let created = item
            .created_at
            .as_deref()
            .map_or_else(|| "unknown date".to_owned(), format_timestamp);
        writeln!(
            writer,
            "  #{} [{}] {}/5 {}{contact} ({created})",
            item.id,
            item.display_sentiment().display_name(),
            item.rating,
            item.name
        )
        .map_err(|e| io_error(&e))?;
        writeln!(writer, "      {}", item.message).map_err(|e| io_error(&e))?;
    }

    let counts = SummaryCounts::from_items(shown.iter().copied());
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Total: {}  Positive: {}  Negative: {}  Neutral: {}",
        counts.total, counts.positive, counts.negative, counts.neutral
    )
    .map_err(|e| io_error(&e))
}

/// Writes the analytics snapshot as plain text.
pub fn write_analytics_summary<W: Write>(
    writer: &mut W,
    snapshot: &AnalyticsSnapshot,
) -> Result<(), ApiError> {
    let cards = DashboardCards::from_snapshot(snapshot);
    writeln!(writer, "Total feedback: {}", cards.total).map_err(|e| io_error(&e))?;
    writeln!(writer, "Average rating: {}", cards.average_rating).map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Positive: {}  Neutral: {}  Negative: {}",
        cards.positive, cards.neutral, cards.negative
    )
    .map_err(|e| io_error(&e))?;

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "Sentiment distribution:").map_err(|e| io_error(&e))?;
    for slice in sentiment_slices(snapshot) {
        writeln!(writer, "  {}: {} ({}%)", slice.label, slice.value, slice.percent)
            .map_err(|e| io_error(&e))?;
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "Rating distribution:").map_err(|e| io_error(&e))?;
    for bar in rating_bars(snapshot) {
        writeln!(writer, "  {}: {}", bar.label, bar.count).map_err(|e| io_error(&e))?;
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "Recent feedback:").map_err(|e| io_error(&e))?;
    if snapshot.recent_feedback.is_empty() {
        writeln!(writer, "  (none)").map_err(|e| io_error(&e))?;
    }
    for recent in &snapshot.recent_feedback {
        let sentiment = recent
            .sentiment
            .as_ref()
            .map_or("Unlabelled", Sentiment::display_name);
        writeln!(
            writer,
            "  #{} {} {}/5 [{sentiment}]",
            recent.id, recent.name, recent.rating
        )
        .map_err(|e| io_error(&e))?;
    }

    Ok(())
}

/// Writes the result of the sentiment maintenance action.
pub fn write_fix_report<W: Write>(
    writer: &mut W,
    report: &FixSentimentsReport,
) -> Result<(), ApiError> {
    match report.total_feedback {
        Some(total) => writeln!(
            writer,
            "Updated sentiments for {} of {total} records.",
            report.updated_count
        ),
        None => writeln!(
            writer,
            "Updated sentiments for {} records.",
            report.updated_count
        ),
    }
    .map_err(|e| io_error(&e))?;

    if let Some(message) = report.message.as_deref().filter(|text| !text.is_empty()) {
        writeln!(writer, "{message}").map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Converts an IO error to an `ApiError`.
pub(crate) fn io_error(error: &io::Error) -> ApiError {
    ApiError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::{fixture, rstest};
    use ulasan::api::models::RecentFeedback;
    use ulasan::api::models::test_support::{feedback_item, feedback_with_sentiment};

    use super::*;

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), ApiError>,
    {
        let mut buffer = Vec::new();
        write(&mut buffer).expect("should write output");
        String::from_utf8(buffer).expect("output should be valid UTF-8")
    }

    #[fixture]
    fn items() -> Vec<FeedbackItem> {
        vec![
            feedback_item(1, "Ani", "Pelayanan cepat"),
            FeedbackItem {
                email: Some("budi@example.com".to_owned()),
                ..feedback_with_sentiment(2, Sentiment::Negatif, 1)
            },
            FeedbackItem {
                sentiment: None,
                rating: 3,
                ..feedback_item(3, "Citra", "Antrian panjang")
            },
        ]
    }

    #[rstest]
    fn list_output_includes_records_and_summary(items: Vec<FeedbackItem>) {
        let output = render(|buffer| {
            write_feedback_list(buffer, &items, &FeedbackQuery::default(), "")
        });

        assert!(output.starts_with("Feedback (Sentiment: all"));
        assert!(output.contains("#1 [Positive] 5/5 Ani"));
        assert!(output.contains("#2 [Negative] 1/5 Patient 2 <budi@example.com>"));
        assert!(output.contains("      Antrian panjang"));
        // Unlabelled records display a fallback but are not counted.
        assert!(output.contains("#3 [Neutral] 3/5 Citra"));
        assert!(output.contains("Total: 3  Positive: 1  Negative: 1  Neutral: 0"));
    }

    #[rstest]
    fn list_output_applies_search_locally(items: Vec<FeedbackItem>) {
        let output = render(|buffer| {
            write_feedback_list(buffer, &items, &FeedbackQuery::default(), "antrian")
        });

        assert!(output.contains("Search: \"antrian\""));
        assert!(output.contains("Citra"));
        assert!(!output.contains("Ani"));
        assert!(output.contains("Total: 1"));
    }

    #[rstest]
    fn list_output_keeps_search_whitespace(items: Vec<FeedbackItem>) {
        let output = render(|buffer| {
            write_feedback_list(buffer, &items, &FeedbackQuery::default(), " ani")
        });

        assert!(output.contains("Search: \" ani\""));
        assert!(output.contains("No feedback found."));
        assert!(output.contains("Total: 0"));
    }

    #[test]
    fn empty_list_says_so() {
        let output =
            render(|buffer| write_feedback_list(buffer, &[], &FeedbackQuery::default(), ""));

        assert!(output.contains("No feedback found."));
        assert!(output.contains("Total: 0"));
    }

    #[test]
    fn analytics_output_lists_cards_and_distributions() {
        let snapshot = AnalyticsSnapshot {
            total_feedback: 4,
            average_rating: 3.5,
            sentiment_distribution: BTreeMap::from([
                ("negatif".to_owned(), 1),
                ("positif".to_owned(), 3),
            ]),
            rating_distribution: BTreeMap::from([("1".to_owned(), 1), ("5".to_owned(), 3)]),
            recent_feedback: vec![RecentFeedback {
                id: 9,
                name: "Dewi".to_owned(),
                rating: 5,
                sentiment: Some(Sentiment::Positif),
                created_at: None,
            }],
        };

        let output = render(|buffer| write_analytics_summary(buffer, &snapshot));

        assert!(output.contains("Total feedback: 4"));
        assert!(output.contains("Average rating: 3.50"));
        assert!(output.contains("Positive: 3  Neutral: 0  Negative: 1"));
        assert!(output.contains("  Negatif: 1 (25%)"));
        assert!(output.contains("  Positif: 3 (75%)"));
        assert!(output.contains("  5 stars: 3"));
        assert!(output.contains("  #9 Dewi 5/5 [Positive]"));
    }

    #[rstest]
    #[case::with_total(
        FixSentimentsReport { updated_count: 2, total_feedback: Some(10), message: None },
        "Updated sentiments for 2 of 10 records."
    )]
    #[case::without_total(
        FixSentimentsReport { updated_count: 0, total_feedback: None, message: Some("done".to_owned()) },
        "Updated sentiments for 0 records.\ndone"
    )]
    fn fix_report_output(#[case] report: FixSentimentsReport, #[case] expected: &str) {
        let output = render(|buffer| write_fix_report(buffer, &report));

        assert_eq!(output.trim_end(), expected);
    }
}
