//! Startup, polling, and shared refresh signal handling.
//!
//! Each polling view runs its own timer chain: a tick fetches that view and
//! re-arms the timer whatever the fetch outcome. Successful submissions bump
//! the shared [`RefreshSignal`](crate::tui::refresh::RefreshSignal), which
//! each view observes once.

use std::any::Any;

use bubbletea_rs::Cmd;

use super::FeedbackApp;
use crate::tui::messages::AppMsg;
use crate::tui::refresh::{PollTarget, REFRESH_INTERVAL};

/// Combines commands, avoiding a batch wrapper for zero or one command.
pub(super) fn combine(mut cmds: Vec<Cmd>) -> Option<Cmd> {
    if cmds.len() > 1 {
        return Some(bubbletea_rs::batch(cmds));
    }
    cmds.pop()
}

impl FeedbackApp {
    /// Handles the synthetic startup message.
    ///
    /// Loads both polling views and arms their timers. Later `Initialized`
    /// messages are ignored so timers are never doubled.
    pub(super) fn handle_initialized(&mut self) -> Option<Cmd> {
        if self.has_initialized {
            return None;
        }
        self.has_initialized = true;

        combine(vec![
            self.start_list_fetch(),
            self.start_dashboard_fetch(),
            Self::arm_poll_timer(PollTarget::FeedbackList),
            Self::arm_poll_timer(PollTarget::Dashboard),
        ])
    }

    /// Handles a poll timer tick by fetching `target` and re-arming its
    /// timer.
    pub(super) fn handle_poll_tick(&mut self, target: PollTarget) -> Option<Cmd> {
        let fetch = match target {
            PollTarget::FeedbackList => self.start_list_fetch(),
            PollTarget::Dashboard => self.start_dashboard_fetch(),
        };
        combine(vec![fetch, Self::arm_poll_timer(target)])
    }

    /// Bumps the refresh signal and fetches every view that has not yet
    /// observed the new generation.
    pub(super) fn broadcast_refresh(&mut self) -> Option<Cmd> {
        let generation = self.refresh_signal.bump();
        tracing::debug!(generation, "refresh signal raised");

        let mut cmds = Vec::new();
        if self.list.subscription.observe(self.refresh_signal) {
            cmds.push(self.start_list_fetch());
        }
        if self.dashboard.subscription.observe(self.refresh_signal) {
            cmds.push(self.start_dashboard_fetch());
        }
        combine(cmds)
    }

    /// Creates a command that emits a poll tick for `target` after the
    /// refresh interval.
    pub(super) fn arm_poll_timer(target: PollTarget) -> Cmd {
        Box::pin(async move {
            tokio::time::sleep(REFRESH_INTERVAL).await;
            Some(Box::new(AppMsg::PollTick(target)) as Box<dyn Any + Send>)
        })
    }

    /// Creates a command that emits `Initialized` immediately.
    ///
    /// This synthetic startup event triggers the first render cycle and the
    /// first fetches without waiting for user input.
    pub(super) fn immediate_init_cmd() -> Cmd {
        Box::pin(async { Some(Box::new(AppMsg::Initialized) as Box<dyn Any + Send>) })
    }
}
