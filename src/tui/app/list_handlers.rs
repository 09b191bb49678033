//! Feedback list handlers.
//!
//! Changing any backend parameter issues exactly one fetch. The search term
//! is applied locally and never fetches.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use bubbletea_rs::Cmd;

use super::FeedbackApp;
use crate::api::models::{FeedbackItem, Sentiment};
use crate::api::query::{FeedbackQuery, SortKey};
use crate::telemetry::{FetchSource, TelemetryEvent, elapsed_ms};
use crate::tui::messages::AppMsg;

impl FeedbackApp {
    /// Dispatches list messages to their handlers.
    pub(super) fn handle_list_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::SetSentimentFilter(sentiment) => {
                self.handle_set_sentiment_filter(sentiment.as_ref())
            }
            AppMsg::CycleSentimentFilter => {
                let next = FeedbackQuery::next_sentiment(self.list.query.sentiment.as_ref());
                self.handle_set_sentiment_filter(next.as_ref())
            }
            AppMsg::SetRatingFilter(rating) => self.handle_set_rating_filter(*rating),
            AppMsg::CycleRatingFilter => {
                self.handle_set_rating_filter(FeedbackQuery::next_rating(self.list.query.rating))
            }
            AppMsg::SetSortKey(key) => self.handle_set_sort_key(*key),
            AppMsg::CycleSortKey => self.handle_set_sort_key(self.list.query.sort_by.next()),
            AppMsg::ToggleSortOrder => {
                self.list.query.sort_order = self.list.query.sort_order.toggled();
                Some(self.start_list_fetch())
            }
            AppMsg::ListRefreshRequested => Some(self.start_list_fetch()),
            AppMsg::ListLoaded {
                request,
                items,
                latency_ms,
            } => self.handle_list_loaded(*request, items, *latency_ms),
            AppMsg::ListFailed { request, message } => self.handle_list_failed(*request, message),
            _ => self.handle_search_msg(msg),
        }
    }

    /// Dispatches search editing messages.
    fn handle_search_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::StartSearch => self.list.editing_search = true,
            AppMsg::FinishSearch => self.list.editing_search = false,
            AppMsg::SearchInput(ch) => {
                let mut term = self.list.search.clone();
                term.push(*ch);
                self.apply_search(term);
            }
            AppMsg::SearchBackspace => {
                let mut term = self.list.search.clone();
                term.pop();
                self.apply_search(term);
            }
            AppMsg::SetSearch(term) => self.apply_search(term.clone()),
            _ => {
                debug_assert!(false, "non-list message routed to handle_list_msg");
            }
        }
        None
    }

    fn handle_set_sentiment_filter(&mut self, sentiment: Option<&Sentiment>) -> Option<Cmd> {
        if self.list.query.sentiment.as_ref() == sentiment {
            return None;
        }
        self.list.query.sentiment = sentiment.cloned();
        Some(self.start_list_fetch())
    }

    fn handle_set_rating_filter(&mut self, rating: Option<u8>) -> Option<Cmd> {
        if self.list.query.rating == rating {
            return None;
        }
        self.list.query.rating = rating;
        Some(self.start_list_fetch())
    }

    fn handle_set_sort_key(&mut self, key: SortKey) -> Option<Cmd> {
        if self.list.query.sort_by == key {
            return None;
        }
        self.list.query.sort_by = key;
        Some(self.start_list_fetch())
    }

    fn apply_search(&mut self, term: String) {
        self.list.set_search(term);
        self.list
            .ensure_cursor_visible(self.list_component.visible_height());
    }

    /// Clears the search term, leaving editing mode.
    pub(super) fn clear_search(&mut self) {
        self.list.editing_search = false;
        if !self.list.search.is_empty() {
            self.apply_search(String::new());
        }
    }

    /// Stamps a new list fetch and returns the command that performs it.
    pub(super) fn start_list_fetch(&mut self) -> Cmd {
        let request = self.list.begin_fetch();
        let gateway = Arc::clone(&self.gateway);
        let query = self.list.query.clone();
        tracing::debug!(request, query = %query, "fetching feedback list");

        Box::pin(async move {
            let start = Instant::now();
            let msg = match gateway.list_feedback(&query).await {
                Ok(items) => AppMsg::ListLoaded {
                    request,
                    items,
                    latency_ms: elapsed_ms(start),
                },
                Err(error) => AppMsg::list_failed(request, &error),
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        })
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_list_loaded(
        &mut self,
        request: u64,
        items: &[FeedbackItem],
        latency_ms: u64,
    ) -> Option<Cmd> {
        if !self.list.apply_items(request, items.to_vec()) {
            tracing::debug!(request, "discarding stale feedback list response");
            return None;
        }
        self.list
            .ensure_cursor_visible(self.list_component.visible_height());
        self.telemetry.record(TelemetryEvent::FetchLatencyRecorded {
            source: FetchSource::FeedbackList,
            latency_ms,
            item_count: items.len(),
        });
        None
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_list_failed(&mut self, request: u64, message: &str) -> Option<Cmd> {
        if !self.list.apply_failure(request, message) {
            tracing::debug!(request, "discarding stale feedback list failure");
            return None;
        }
        tracing::warn!(error = message, "failed to load feedback list");
        None
    }
}
