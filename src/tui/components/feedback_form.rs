//! Feedback submission form component.
//!
//! Renders the draft fields with a focus marker, inline validation errors,
//! the star rating control, and the submission banner.

use crate::api::models::rating_label;
use crate::tui::state::{FormField, FormState, SubmitStatus};

use super::text_truncate::truncate_to_width;

const LABEL_WIDTH: usize = 18;
const CURSOR: char = '_';

/// Context for rendering the form.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackFormViewContext<'a> {
    /// Form state to render.
    pub form: &'a FormState,
    /// Maximum line width in columns.
    pub max_width: usize,
}

/// Component for the feedback submission form.
#[derive(Debug, Clone, Default)]
pub struct FeedbackFormComponent;

impl FeedbackFormComponent {
    /// Creates a new form component.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the form as a string.
    #[must_use]
    pub fn view(&self, ctx: &FeedbackFormViewContext<'_>) -> String {
        let form = ctx.form;
        let value_width = ctx.max_width.saturating_sub(LABEL_WIDTH + 4).max(1);
        let mut lines = vec!["  Share your experience with us".to_owned(), String::new()];

        for field in [
            FormField::Name,
            FormField::Email,
            FormField::Rating,
            FormField::Message,
        ] {
            let line = if field == FormField::Rating {
                rating_line(form)
            } else {
                text_field_line(form, field, value_width)
            };
            lines.push(line);
            if let Some(error) = form.error_for(field) {
                lines.push(format!("  {:<LABEL_WIDTH$} ! {error}", ""));
            }
        }

        lines.push(String::new());
        lines.push(submit_line(form));

        if let Some(banner) = banner(form.status) {
            lines.push(String::new());
            lines.push(format!("  {banner}"));
        }
        if let Some(reason) = form
            .failure_reason
            .as_deref()
            .filter(|_| form.status == SubmitStatus::Failed)
        {
            lines.push(format!("  Reason: {reason}"));
        }

        let mut output = String::new();
        for line in lines {
            output.push_str(&truncate_to_width(&line, ctx.max_width));
            output.push('\n');
        }
        output
    }
}

fn focus_marker(form: &FormState, field: FormField) -> &'static str {
    if form.focus == field { ">" } else { " " }
}

fn text_field_line(form: &FormState, field: FormField, value_width: usize) -> String {
    let value = match field {
        FormField::Name => form.draft.name.as_str(),
        FormField::Email => form.draft.email.as_str(),
        _ => form.draft.message.as_str(),
    };
    let mut flattened = value.replace('\n', " ");
    if form.focus == field {
        flattened.push(CURSOR);
    }
    let shown = tail_to_width(&flattened, value_width);
    let label = format!("{}:", field.label());
    format!("{} {label:<LABEL_WIDTH$} {shown}", focus_marker(form, field))
}

/// Keeps the end of `text` so the cursor stays visible while typing.
fn tail_to_width(text: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut kept: Vec<char> = Vec::new();
    let mut used = 0_usize;
    for ch in text.chars().rev() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(char_width) > max_width {
            break;
        }
        kept.push(ch);
        used = used.saturating_add(char_width);
    }
    kept.iter().rev().collect()
}

fn rating_line(form: &FormState) -> String {
    let shown = form.stars.effective_value();
    let preview = if form.stars.hovered().is_some_and(|hovered| hovered != form.draft.rating) {
        " (Enter to select)"
    } else {
        ""
    };
    let label = format!("{}:", FormField::Rating.label());
    format!(
        "{} {label:<LABEL_WIDTH$} {}  {}{preview}",
        focus_marker(form, FormField::Rating),
        form.stars.view(),
        rating_label(shown)
    )
}

fn submit_line(form: &FormState) -> String {
    let label = if form.is_submitting() {
        "[ Submitting... ]"
    } else {
        "[ Submit feedback ]"
    };
    format!("{} {label}", focus_marker(form, FormField::Submit))
}

const fn banner(status: SubmitStatus) -> Option<&'static str> {
    match status {
        SubmitStatus::Idle => None,
        SubmitStatus::Submitting => Some("Sending feedback..."),
        SubmitStatus::Succeeded => {
            Some("Thank you! Your feedback has been submitted. (Esc to dismiss)")
        }
        SubmitStatus::Failed => Some("Failed to submit feedback. Please try again. (Esc to dismiss)"),
    }
}
