//! Analytics dashboard handlers.
//!
//! The fix-sentiments action is single-flight: a second request while one is
//! running is ignored. A completed run always re-fetches the snapshot, even
//! when the backend reports zero updates; a failed run does not.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use bubbletea_rs::Cmd;

use super::FeedbackApp;
use crate::api::models::{AnalyticsSnapshot, FixSentimentsReport};
use crate::telemetry::{FetchSource, TelemetryEvent, elapsed_ms};
use crate::tui::messages::{AppMsg, failure_text};
use crate::tui::state::FixOutcome;

impl FeedbackApp {
    /// Dispatches dashboard messages to their handlers.
    pub(super) fn handle_dashboard_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::DashboardRefreshRequested => Some(self.start_dashboard_fetch()),
            AppMsg::AnalyticsLoaded {
                request,
                snapshot,
                latency_ms,
            } => self.handle_analytics_loaded(*request, snapshot, *latency_ms),
            AppMsg::AnalyticsFailed { request, message } => {
                self.handle_analytics_failed(*request, message)
            }
            AppMsg::FixSentimentsRequested => self.handle_fix_sentiments_requested(),
            AppMsg::FixSentimentsComplete(report) => self.handle_fix_sentiments_complete(report),
            AppMsg::FixSentimentsFailed(message) => self.handle_fix_sentiments_failed(message),
            _ => {
                debug_assert!(false, "non-dashboard message routed to handle_dashboard_msg");
                None
            }
        }
    }

    /// Stamps a new analytics fetch and returns the command that performs it.
    pub(super) fn start_dashboard_fetch(&mut self) -> Cmd {
        let request = self.dashboard.begin_fetch();
        let gateway = Arc::clone(&self.gateway);
        tracing::debug!(request, "fetching analytics snapshot");

        Box::pin(async move {
            let start = Instant::now();
            let msg = match gateway.analytics().await {
                Ok(snapshot) => AppMsg::AnalyticsLoaded {
                    request,
                    snapshot,
                    latency_ms: elapsed_ms(start),
                },
                Err(error) => AppMsg::analytics_failed(request, &error),
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        })
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_analytics_loaded(
        &mut self,
        request: u64,
        snapshot: &AnalyticsSnapshot,
        latency_ms: u64,
    ) -> Option<Cmd> {
        let item_count = snapshot.recent_feedback.len();
        let Some(added) = self.dashboard.apply_snapshot(request, snapshot.clone()) else {
            tracing::debug!(request, "discarding stale analytics response");
            return None;
        };
        if added > 0 {
            tracing::info!(added, "new feedback received since last refresh");
        }
        self.telemetry.record(TelemetryEvent::FetchLatencyRecorded {
            source: FetchSource::Dashboard,
            latency_ms,
            item_count,
        });
        None
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_analytics_failed(&mut self, request: u64, message: &str) -> Option<Cmd> {
        if !self.dashboard.apply_failure(request, message) {
            tracing::debug!(request, "discarding stale analytics failure");
            return None;
        }
        tracing::warn!(error = message, "failed to load analytics");
        None
    }

    fn handle_fix_sentiments_requested(&mut self) -> Option<Cmd> {
        if self.dashboard.fixing {
            return None;
        }
        self.dashboard.fixing = true;
        self.dashboard.fix_outcome = None;
        tracing::debug!("requesting sentiment fix");

        let gateway = Arc::clone(&self.gateway);
        Some(Box::pin(async move {
            let msg = match gateway.fix_sentiments().await {
                Ok(report) => AppMsg::FixSentimentsComplete(report),
                Err(error) => AppMsg::FixSentimentsFailed(failure_text(&error)),
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        }))
    }

    fn handle_fix_sentiments_complete(&mut self, report: &FixSentimentsReport) -> Option<Cmd> {
        self.dashboard.fixing = false;
        self.dashboard.fix_outcome = Some(FixOutcome::Updated(report.updated_count));
        tracing::info!(updated = report.updated_count, "sentiments fixed");
        self.telemetry.record(TelemetryEvent::SentimentsFixed {
            updated_count: report.updated_count,
        });
        Some(self.start_dashboard_fetch())
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_fix_sentiments_failed(&mut self, message: &str) -> Option<Cmd> {
        self.dashboard.fixing = false;
        self.dashboard.fix_outcome = Some(FixOutcome::Failed(message.to_owned()));
        tracing::warn!(error = message, "sentiment fix failed");
        None
    }
}
