//! Data models exchanged with the feedback service.
//!
//! Every sentiment label in these types is assigned by the backend. The
//! client only ever reads labels; [`fallback_sentiment`] exists purely for
//! display when the backend leaves the field empty.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Backend-assigned sentiment label for a feedback message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    /// Positive feedback (`positif`).
    Positif,
    /// Neutral feedback (`neutral`).
    Neutral,
    /// Negative feedback (`negatif`).
    Negatif,
    /// A label this client does not know about, kept verbatim.
    Other(String),
}

impl Sentiment {
    /// The three labels the backend is documented to produce, in filter order.
    pub const KNOWN: [Self; 3] = [Self::Positif, Self::Negatif, Self::Neutral];

    /// Parses a backend label, matching known labels case-insensitively.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positif" => Self::Positif,
            "neutral" => Self::Neutral,
            "negatif" => Self::Negatif,
            _ => Self::Other(label.to_owned()),
        }
    }

    /// Returns the wire label sent to and received from the backend.
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            Self::Positif => "positif",
            Self::Neutral => "neutral",
            Self::Negatif => "negatif",
            Self::Other(label) => label.as_str(),
        }
    }

    /// Returns the label shown to users.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Positif => "Positive",
            Self::Neutral => "Neutral",
            Self::Negatif => "Negative",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for Sentiment {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<Sentiment> for String {
    fn from(value: Sentiment) -> Self {
        value.as_label().to_owned()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Human-readable label for a star rating.
#[must_use]
pub const fn rating_label(rating: u8) -> &'static str {
    match rating {
        1 => "Very poor",
        2 => "Poor",
        3 => "Fair",
        4 => "Good",
        5 => "Very good",
        _ => "Unknown",
    }
}

/// Rating-derived sentiment guess used only when the backend omits a label.
///
/// The result is never sent to the backend.
#[must_use]
pub const fn fallback_sentiment(rating: u8) -> Sentiment {
    match rating {
        1 | 2 => Sentiment::Negatif,
        4 | 5 => Sentiment::Positif,
        _ => Sentiment::Neutral,
    }
}

/// A single feedback record as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Record identifier.
    pub id: u64,
    /// Name of the person who left the feedback.
    pub name: String,
    /// Contact email, if one was given.
    #[serde(default)]
    pub email: Option<String>,
    /// Star rating between 1 and 5.
    pub rating: u8,
    /// Free-text feedback message.
    pub message: String,
    /// Backend-assigned sentiment; `None` when absent or empty.
    #[serde(default, deserialize_with = "deserialize_optional_sentiment")]
    pub sentiment: Option<Sentiment>,
    /// Creation timestamp (ISO 8601 format).
    #[serde(default)]
    pub created_at: Option<String>,
}

impl FeedbackItem {
    /// Returns the sentiment to display, falling back to a rating-derived
    /// guess when the backend did not supply one.
    #[must_use]
    pub fn display_sentiment(&self) -> Sentiment {
        self.sentiment
            .clone()
            .unwrap_or_else(|| fallback_sentiment(self.rating))
    }

    /// Returns the email only when it is present and non-empty.
    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

/// Request body for creating a feedback record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFeedback {
    /// Name of the person leaving feedback.
    pub name: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Star rating between 1 and 5.
    pub rating: u8,
    /// Feedback message.
    pub message: String,
}

/// Condensed feedback entry embedded in the analytics snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecentFeedback {
    /// Record identifier.
    pub id: u64,
    /// Name of the person who left the feedback.
    pub name: String,
    /// Star rating between 1 and 5.
    pub rating: u8,
    /// Backend-assigned sentiment; `None` when absent or empty.
    #[serde(default, deserialize_with = "deserialize_optional_sentiment")]
    pub sentiment: Option<Sentiment>,
    /// Creation timestamp (ISO 8601 format).
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Aggregate read model produced by the analytics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Number of feedback records stored by the backend.
    pub total_feedback: u64,
    /// Average rating across all records.
    #[serde(default)]
    pub average_rating: f64,
    /// Count of records per sentiment label.
    #[serde(default)]
    pub sentiment_distribution: BTreeMap<String, u64>,
    /// Count of records per rating, keyed by the rating as a string.
    #[serde(default)]
    pub rating_distribution: BTreeMap<String, u64>,
    /// The most recent records, newest first.
    #[serde(default)]
    pub recent_feedback: Vec<RecentFeedback>,
}

impl AnalyticsSnapshot {
    /// Returns the count recorded for a sentiment, or zero when missing.
    #[must_use]
    pub fn sentiment_count(&self, sentiment: &Sentiment) -> u64 {
        self.sentiment_distribution
            .get(sentiment.as_label())
            .copied()
            .unwrap_or(0)
    }
}

/// Result of asking the backend to recompute stored sentiments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FixSentimentsReport {
    /// Number of records whose sentiment changed.
    pub updated_count: u64,
    /// Number of records inspected, when reported.
    #[serde(default)]
    pub total_feedback: Option<u64>,
    /// Backend status message, when reported.
    #[serde(default)]
    pub message: Option<String>,
}

fn deserialize_optional_sentiment<'de, D>(deserializer: D) -> Result<Option<Sentiment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|label| !label.trim().is_empty())
        .map(Sentiment::from))
}

/// Parses a backend timestamp, accepting both offset-aware and naive forms.
///
/// Naive timestamps are interpreted as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Formats a backend timestamp for display in local time.
///
/// Unparseable values are shown verbatim.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_owned(),
        |parsed| {
            parsed
                .with_timezone(&Local)
                .format("%d %b %Y %H:%M")
                .to_string()
        },
    )
}
