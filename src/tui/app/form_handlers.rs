//! Submission form handlers.
//!
//! Editing never talks to the backend. `SubmitRequested` validates the draft
//! locally and only issues `POST /feedback` when every field passes; a
//! successful submission resets the draft and bumps the shared refresh
//! signal so the list and dashboard re-fetch.

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::Cmd;

use super::FeedbackApp;
use crate::api::models::FeedbackItem;
use crate::telemetry::TelemetryEvent;
use crate::tui::messages::{AppMsg, failure_text};
use crate::tui::state::{FormField, SubmitStatus};

impl FeedbackApp {
    /// Dispatches form messages to their handlers.
    pub(super) fn handle_form_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::FocusNext => self.move_focus(self.form.focus.next()),
            AppMsg::FocusPrevious => self.move_focus(self.form.focus.previous()),
            AppMsg::InsertChar(ch) => self.handle_insert_char(*ch),
            AppMsg::DeleteChar => self.handle_delete_char(),
            AppMsg::RatingHoverNext => self.handle_rating_hover(true),
            AppMsg::RatingHoverPrevious => self.handle_rating_hover(false),
            AppMsg::RatingCommit => self.select_rating(self.form.stars.effective_value()),
            AppMsg::RatingSelect(rating) => self.select_rating(*rating),
            AppMsg::SubmitRequested => self.handle_submit_requested(),
            AppMsg::SubmitSucceeded(item) => self.handle_submit_succeeded(item),
            AppMsg::SubmitFailed(message) => self.handle_submit_failed(message),
            _ => {
                debug_assert!(false, "non-form message routed to handle_form_msg");
                None
            }
        }
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    const fn move_focus(&mut self, field: FormField) -> Option<Cmd> {
        self.form.set_focus(field);
        None
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_insert_char(&mut self, ch: char) -> Option<Cmd> {
        if let Some(text) = self.form.focused_text_mut() {
            text.push(ch);
        }
        None
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_delete_char(&mut self) -> Option<Cmd> {
        if let Some(text) = self.form.focused_text_mut() {
            text.pop();
        }
        None
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_rating_hover(&mut self, forward: bool) -> Option<Cmd> {
        if self.form.focus == FormField::Rating {
            self.form.stars.step_hover(forward);
        }
        None
    }

    /// Commits `rating` through the star control's change callback.
    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn select_rating(&mut self, rating: u8) -> Option<Cmd> {
        let mut committed = None;
        self.form
            .stars
            .select(rating, |value| committed = Some(value));
        if let Some(value) = committed {
            self.form.commit_rating(value);
        }
        None
    }

    fn handle_submit_requested(&mut self) -> Option<Cmd> {
        if self.form.is_submitting() {
            return None;
        }

        let body = match self.form.draft.validate() {
            Ok(body) => body,
            Err(errors) => {
                if let Some(first) = errors.first() {
                    self.form.set_focus(first.field());
                }
                self.form.errors = errors;
                self.form.status = SubmitStatus::Idle;
                return None;
            }
        };

        self.form.errors.clear();
        self.form.failure_reason = None;
        self.form.status = SubmitStatus::Submitting;
        tracing::debug!(rating = body.rating, "submitting feedback");

        let gateway = Arc::clone(&self.gateway);
        Some(Box::pin(async move {
            let msg = match gateway.create_feedback(&body).await {
                Ok(item) => AppMsg::SubmitSucceeded(item),
                Err(error) => AppMsg::SubmitFailed(failure_text(&error)),
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        }))
    }

    fn handle_submit_succeeded(&mut self, item: &FeedbackItem) -> Option<Cmd> {
        self.form.reset();
        self.form.status = SubmitStatus::Succeeded;
        tracing::info!(feedback_id = item.id, "feedback submitted");
        self.telemetry
            .record(TelemetryEvent::FeedbackSubmitted { feedback_id: item.id });
        self.broadcast_refresh()
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_submit_failed(&mut self, message: &str) -> Option<Cmd> {
        tracing::warn!(error = message, "feedback submission failed");
        self.form.status = SubmitStatus::Failed;
        self.form.failure_reason = Some(message.to_owned());
        None
    }

    /// Clears a finished submission banner. An in-flight banner stays.
    pub(super) fn dismiss_form_banner(&mut self) {
        if !self.form.is_submitting() {
            self.form.status = SubmitStatus::Idle;
            self.form.failure_reason = None;
        }
    }
}
