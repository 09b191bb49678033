//! Chart series derived from an analytics snapshot.
//!
//! Both series enumerate the backend's distributions in key order. Nothing
//! here re-classifies or re-counts records.

use crate::api::models::AnalyticsSnapshot;

/// One slice of the sentiment distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentSlice {
    /// Backend label with its first letter upper-cased.
    pub label: String,
    /// Number of records with this label.
    pub value: u64,
    /// Share of all slices, rounded to a whole percent.
    pub percent: u64,
}

/// One bar of the rating distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingBar {
    /// Bar label, e.g. `4 stars`.
    pub label: String,
    /// Number of records with this rating.
    pub count: u64,
}

/// Builds the sentiment slices for `snapshot`.
#[must_use]
pub fn sentiment_slices(snapshot: &AnalyticsSnapshot) -> Vec<SentimentSlice> {
    let total: u64 = snapshot.sentiment_distribution.values().sum();
    snapshot
        .sentiment_distribution
        .iter()
        .map(|(label, &value)| SentimentSlice {
            label: capitalise_first(label),
            value,
            percent: rounded_percent(value, total),
        })
        .collect()
}

/// Builds the rating bars for `snapshot`.
#[must_use]
pub fn rating_bars(snapshot: &AnalyticsSnapshot) -> Vec<RatingBar> {
    snapshot
        .rating_distribution
        .iter()
        .map(|(rating, &count)| RatingBar {
            label: format!("{rating} stars"),
            count,
        })
        .collect()
}

fn capitalise_first(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Rounds half up to a whole percent.
fn rounded_percent(value: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    value
        .saturating_mul(200)
        .saturating_add(total)
        .checked_div(total.saturating_mul(2))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::{fixture, rstest};

    use super::{RatingBar, rating_bars, sentiment_slices};
    use crate::api::models::AnalyticsSnapshot;

    #[fixture]
    fn snapshot() -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            total_feedback: 6,
            average_rating: 3.5,
            sentiment_distribution: BTreeMap::from([
                ("positif".to_owned(), 3),
                ("neutral".to_owned(), 1),
                ("negatif".to_owned(), 2),
            ]),
            rating_distribution: BTreeMap::from([
                ("1".to_owned(), 1),
                ("4".to_owned(), 2),
                ("5".to_owned(), 3),
            ]),
            recent_feedback: Vec::new(),
        }
    }

    #[rstest]
    fn slices_sum_to_total_when_every_record_is_labelled(snapshot: AnalyticsSnapshot) {
        let slices = sentiment_slices(&snapshot);

        let sum: u64 = slices.iter().map(|slice| slice.value).sum();
        assert_eq!(sum, snapshot.total_feedback);
    }

    #[rstest]
    fn slices_are_capitalised_in_key_order(snapshot: AnalyticsSnapshot) {
        let labels: Vec<String> = sentiment_slices(&snapshot)
            .into_iter()
            .map(|slice| format!("{} {}%", slice.label, slice.percent))
            .collect();

        assert_eq!(labels, vec!["Negatif 33%", "Neutral 17%", "Positif 50%"]);
    }

    #[rstest]
    fn bars_follow_rating_keys(snapshot: AnalyticsSnapshot) {
        assert_eq!(
            rating_bars(&snapshot),
            vec![
                RatingBar {
                    label: "1 stars".to_owned(),
                    count: 1
                },
                RatingBar {
                    label: "4 stars".to_owned(),
                    count: 2
                },
                RatingBar {
                    label: "5 stars".to_owned(),
                    count: 3
                },
            ]
        );
    }

    #[test]
    fn empty_distribution_yields_no_slices() {
        let snapshot = AnalyticsSnapshot::default();

        assert!(sentiment_slices(&snapshot).is_empty());
        assert!(rating_bars(&snapshot).is_empty());
    }
}
