//! Test helpers for constructing feedback fixtures.
//!
//! # Examples
//!
//! ```
//! use ulasan::api::models::test_support::{feedback_item, feedback_with_id};
//!
//! let item = feedback_item(1, "Ani", "Pelayanan cepat");
//! let other = feedback_with_id(42);
//! assert_eq!(other.name, "Patient 42");
//! ```

use super::{FeedbackItem, Sentiment};

/// Constructs a `FeedbackItem` with id, name, and message set.
///
/// The rating defaults to 5, the sentiment to `positif`, and the email to
/// `None`.
///
/// # Examples
///
/// ```
/// use ulasan::api::models::test_support::feedback_item;
///
/// let item = feedback_item(1, "Ani", "Pelayanan cepat");
/// assert_eq!(item.id, 1);
/// assert_eq!(item.rating, 5);
/// ```
#[must_use]
pub fn feedback_item(id: u64, name: &str, message: &str) -> FeedbackItem {
    FeedbackItem {
        id,
        name: name.to_owned(),
        email: None,
        rating: 5,
        message: message.to_owned(),
        sentiment: Some(Sentiment::Positif),
        created_at: Some("2025-03-01T08:30:00".to_owned()),
    }
}

/// Creates a `FeedbackItem` with only an ID and generated name/message.
#[must_use]
pub fn feedback_with_id(id: u64) -> FeedbackItem {
    feedback_item(id, &format!("Patient {id}"), &format!("Feedback {id}"))
}

/// Creates a `FeedbackItem` with the given sentiment label and rating.
#[must_use]
pub fn feedback_with_sentiment(id: u64, sentiment: Sentiment, rating: u8) -> FeedbackItem {
    FeedbackItem {
        sentiment: Some(sentiment),
        rating,
        ..feedback_with_id(id)
    }
}

/// Creates a vector of feedback items with sequential IDs starting from 1.
///
/// # Examples
///
/// ```
/// use ulasan::api::models::test_support::create_feedback;
///
/// let items = create_feedback(3);
/// assert_eq!(items.len(), 3);
/// ```
#[must_use]
pub fn create_feedback(count: u64) -> Vec<FeedbackItem> {
    (1..=count).map(feedback_with_id).collect()
}
