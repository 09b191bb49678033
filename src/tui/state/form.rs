//! Draft and focus state for the feedback submission form.
//!
//! The draft is validated locally before anything is sent. On success it is
//! reset to its defaults; on failure it is left exactly as the user typed it.

use thiserror::Error;

use crate::api::models::NewFeedback;
use crate::tui::components::StarRating;

/// Rating pre-selected on a fresh draft.
pub const DEFAULT_RATING: u8 = 5;

/// Highest selectable rating.
pub const MAX_RATING: u8 = 5;

/// Values entered into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    /// Patient name.
    pub name: String,
    /// Optional contact email.
    pub email: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Feedback message.
    pub message: String,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            rating: DEFAULT_RATING,
            message: String::new(),
        }
    }
}

/// A reason the draft cannot be submitted.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormValidationError {
    /// Name is empty after trimming.
    #[error("Name is required")]
    MissingName,
    /// Email is present but does not look like an address.
    #[error("Enter a valid email address")]
    InvalidEmail,
    /// Rating is outside 1 to 5.
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    /// Message is empty after trimming.
    #[error("Message is required")]
    MissingMessage,
}

impl FormValidationError {
    /// Field the error belongs to.
    #[must_use]
    pub const fn field(self) -> FormField {
        match self {
            Self::MissingName => FormField::Name,
            Self::InvalidEmail => FormField::Email,
            Self::RatingOutOfRange => FormField::Rating,
            Self::MissingMessage => FormField::Message,
        }
    }
}

impl FormDraft {
    /// Validates the draft and builds the request body.
    ///
    /// Text fields are trimmed; an empty email is sent as absent.
    ///
    /// # Errors
    ///
    /// Returns every validation failure, in field order.
    pub fn validate(&self) -> Result<NewFeedback, Vec<FormValidationError>> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push(FormValidationError::MissingName);
        }
        if !email.is_empty() && !looks_like_email(email) {
            errors.push(FormValidationError::InvalidEmail);
        }
        if !(1..=MAX_RATING).contains(&self.rating) {
            errors.push(FormValidationError::RatingOutOfRange);
        }
        if message.is_empty() {
            errors.push(FormValidationError::MissingMessage);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewFeedback {
            name: name.to_owned(),
            email: (!email.is_empty()).then(|| email.to_owned()),
            rating: self.rating,
            message: message.to_owned(),
        })
    }
}

/// Text before `@`, text after it, no whitespace.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
}

/// Focusable elements of the form, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    /// Name input.
    #[default]
    Name,
    /// Email input.
    Email,
    /// Star rating control.
    Rating,
    /// Message input.
    Message,
    /// Submit button.
    Submit,
}

impl FormField {
    const ORDER: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Rating,
        Self::Message,
        Self::Submit,
    ];

    /// Field after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = self.position();
        Self::ORDER
            .get(index.saturating_add(1))
            .copied()
            .unwrap_or(Self::Name)
    }

    /// Field before this one, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let index = self.position();
        index
            .checked_sub(1)
            .and_then(|previous| Self::ORDER.get(previous).copied())
            .unwrap_or(Self::Submit)
    }

    /// Returns `true` for fields that accept typed text.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Name | Self::Email | Self::Message)
    }

    /// Label shown next to the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email (optional)",
            Self::Rating => "Rating",
            Self::Message => "Message",
            Self::Submit => "Submit",
        }
    }

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }
}

/// Lifecycle of the current submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Nothing submitted, or the last banner was dismissed.
    #[default]
    Idle,
    /// A request is in flight.
    Submitting,
    /// The backend accepted the last submission.
    Succeeded,
    /// The last submission failed.
    Failed,
}

/// Complete state of the submission form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Values entered so far.
    pub draft: FormDraft,
    /// Focused field.
    pub focus: FormField,
    /// Rating control mirroring `draft.rating`.
    pub stars: StarRating,
    /// Submission lifecycle.
    pub status: SubmitStatus,
    /// Failures from the last validation attempt.
    pub errors: Vec<FormValidationError>,
    /// Reason given for the last failed submission.
    pub failure_reason: Option<String>,
}

impl FormState {
    /// Creates an empty form with the default rating.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Returns the validation error for `field`, if any.
    #[must_use]
    pub fn error_for(&self, field: FormField) -> Option<FormValidationError> {
        self.errors.iter().copied().find(|error| error.field() == field)
    }

    /// Moves focus, clearing any rating preview left behind.
    pub const fn set_focus(&mut self, field: FormField) {
        self.stars.leave();
        self.focus = field;
    }

    /// Commits a rating to the draft and the control.
    pub const fn commit_rating(&mut self, rating: u8) {
        self.draft.rating = rating;
        self.stars.set_value(rating);
        self.stars.leave();
    }

    /// Returns the focused text buffer, if the focused field takes text.
    pub const fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.draft.name),
            FormField::Email => Some(&mut self.draft.email),
            FormField::Message => Some(&mut self.draft.message),
            FormField::Rating | FormField::Submit => None,
        }
    }

    /// Resets the draft after a successful submission.
    pub fn reset(&mut self) {
        self.draft = FormDraft::default();
        self.stars = StarRating::default();
        self.focus = FormField::Name;
        self.errors.clear();
        self.failure_reason = None;
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{FormDraft, FormField, FormState, FormValidationError};

    #[fixture]
    fn valid_draft() -> FormDraft {
        FormDraft {
            name: "  Ani  ".to_owned(),
            email: String::new(),
            rating: 4,
            message: " Pelayanan cepat ".to_owned(),
        }
    }

    #[rstest]
    fn valid_draft_is_trimmed(valid_draft: FormDraft) {
        let body = valid_draft.validate().expect("draft should be valid");

        assert_eq!(body.name, "Ani");
        assert_eq!(body.email, None);
        assert_eq!(body.rating, 4);
        assert_eq!(body.message, "Pelayanan cepat");
    }

    #[test]
    fn blank_fields_report_every_error() {
        let draft = FormDraft {
            name: "   ".to_owned(),
            message: "\n".to_owned(),
            ..FormDraft::default()
        };

        let errors = draft.validate().expect_err("draft should be invalid");

        assert_eq!(
            errors,
            vec![
                FormValidationError::MissingName,
                FormValidationError::MissingMessage
            ]
        );
    }

    #[rstest]
    #[case::no_at("ani.example.com", false)]
    #[case::no_local("@example.com", false)]
    #[case::no_domain("ani@", false)]
    #[case::space("ani @example.com", false)]
    #[case::valid("ani@example.com", true)]
    fn email_shape_is_checked(valid_draft: FormDraft, #[case] email: &str, #[case] ok: bool) {
        let draft = FormDraft {
            email: email.to_owned(),
            ..valid_draft
        };

        let result = draft.validate();

        assert_eq!(result.is_ok(), ok, "unexpected result for {email}: {result:?}");
    }

    #[rstest]
    #[case::zero(0)]
    #[case::six(6)]
    fn rating_outside_range_is_rejected(valid_draft: FormDraft, #[case] rating: u8) {
        let draft = FormDraft {
            rating,
            ..valid_draft
        };

        let errors = draft.validate().expect_err("rating should be rejected");

        assert_eq!(errors, vec![FormValidationError::RatingOutOfRange]);
    }

    #[test]
    fn focus_order_wraps_in_both_directions() {
        assert_eq!(FormField::Name.next(), FormField::Email);
        assert_eq!(FormField::Submit.next(), FormField::Name);
        assert_eq!(FormField::Name.previous(), FormField::Submit);
        assert_eq!(FormField::Message.previous(), FormField::Rating);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = FormState::new();
        form.draft.name = "Ani".to_owned();
        form.commit_rating(2);
        form.set_focus(FormField::Submit);

        form.reset();

        assert_eq!(form.draft, FormDraft::default());
        assert_eq!(form.stars.value(), 5);
        assert_eq!(form.focus, FormField::Name);
    }

    #[test]
    fn leaving_rating_field_drops_preview() {
        let mut form = FormState::new();
        form.set_focus(FormField::Rating);
        form.stars.hover(2);

        form.set_focus(FormField::Message);

        assert_eq!(form.stars.effective_value(), 5);
        assert_eq!(form.draft.rating, 5);
    }
}
