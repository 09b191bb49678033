//! Server-side filter and sort parameters for the feedback listing.

use std::fmt;
use std::str::FromStr;

use super::error::ApiError;
use super::models::Sentiment;

/// Column the backend sorts the feedback listing by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Creation timestamp (`created_at`).
    #[default]
    Date,
    /// Patient name.
    Name,
    /// Star rating.
    Rating,
    /// Sentiment label.
    Sentiment,
}

impl SortKey {
    /// Returns the `sort_by` query value.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Date => "created_at",
            Self::Name => "name",
            Self::Rating => "rating",
            Self::Sentiment => "sentiment",
        }
    }

    /// Returns the label shown in the filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Name => "Name",
            Self::Rating => "Rating",
            Self::Sentiment => "Sentiment",
        }
    }

    /// Returns the next key in cycling order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Date => Self::Name,
            Self::Name => Self::Rating,
            Self::Rating => Self::Sentiment,
            Self::Sentiment => Self::Date,
        }
    }
}

impl FromStr for SortKey {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "created_at" | "date" => Ok(Self::Date),
            "name" => Ok(Self::Name),
            "rating" => Ok(Self::Rating),
            "sentiment" => Ok(Self::Sentiment),
            other => Err(ApiError::Configuration {
                message: format!(
                    "unknown sort key '{other}' (expected created_at, name, rating, or sentiment)"
                ),
            }),
        }
    }
}

/// Direction of the backend sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Returns the `sort_order` query value.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Returns a compact arrow for the filter bar.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "asc ↑",
            Self::Descending => "desc ↓",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(ApiError::Configuration {
                message: format!("unknown sort order '{other}' (expected asc or desc)"),
            }),
        }
    }
}

/// Parameters for `GET /feedback`.
///
/// The backend is authoritative for everything expressed here; free-text
/// search is applied locally and is not part of the query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedbackQuery {
    /// Only return items with this sentiment.
    pub sentiment: Option<Sentiment>,
    /// Only return items with this rating.
    pub rating: Option<u8>,
    /// Sort column.
    pub sort_by: SortKey,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl FeedbackQuery {
    /// Returns the query string pairs, omitting unset filters.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(sentiment) = &self.sentiment {
            pairs.push(("sentiment", sentiment.as_label().to_owned()));
        }
        if let Some(rating) = self.rating {
            pairs.push(("rating", rating.to_string()));
        }
        pairs.push(("sort_by", self.sort_by.as_param().to_owned()));
        pairs.push(("sort_order", self.sort_order.as_param().to_owned()));
        pairs
    }

    /// Cycles the sentiment filter: all, positif, negatif, neutral, all.
    #[must_use]
    pub fn next_sentiment(current: Option<&Sentiment>) -> Option<Sentiment> {
        match current {
            None => Some(Sentiment::Positif),
            Some(Sentiment::Positif) => Some(Sentiment::Negatif),
            Some(Sentiment::Negatif) => Some(Sentiment::Neutral),
            Some(Sentiment::Neutral | Sentiment::Other(_)) => None,
        }
    }

    /// Cycles the rating filter: all, 1, 2, 3, 4, 5, all.
    #[must_use]
    pub const fn next_rating(current: Option<u8>) -> Option<u8> {
        match current {
            None => Some(1),
            Some(rating) if rating < 5 => Some(rating + 1),
            Some(_) => None,
        }
    }
}

impl fmt::Display for FeedbackQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sentiment = self
            .sentiment
            .as_ref()
            .map_or("all", Sentiment::display_name);
        let rating = self
            .rating
            .map_or_else(|| "all".to_owned(), |rating| format!("{rating}★"));
        write!(
            f,
            "Sentiment: {sentiment}  Rating: {rating}  Sort: {} {}",
            self.sort_by.label(),
            self.sort_order.arrow()
        )
    }
}
