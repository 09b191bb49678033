//! Main TUI application model implementing the MVU pattern.
//!
//! [`FeedbackApp`] owns the state of all three views and coordinates the
//! backend calls they issue. Handlers are split by view:
//!
//! - `form_handlers`: draft editing, rating control, and submission
//! - `list_handlers`: filters, search, cursor movement, and list fetches
//! - `dashboard_handlers`: analytics fetches and the fix-sentiments action
//! - `refresh_handlers`: startup, poll timers, and the shared refresh signal
//! - `rendering`: header, status bar, and help overlay

use std::fmt;
use std::sync::Arc;

use bubbletea_rs::Cmd;

use crate::api::gateway::FeedbackGateway;
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};

use super::components::{DETAIL_HEIGHT, FeedbackListComponent, LIST_CHROME_HEIGHT};
use super::messages::AppMsg;
use super::refresh::RefreshSignal;
use super::state::{DashboardState, FormState, ListState};
use super::storage::ListSettings;

mod dashboard_handlers;
mod form_handlers;
mod list_handlers;
mod model_impl;
mod refresh_handlers;
mod rendering;
mod view_mode;

pub use view_mode::ActiveView;
pub(crate) use view_mode::{CHROME_HEIGHT, MIN_LIST_HEIGHT};

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

/// Main application model for the feedback TUI.
pub struct FeedbackApp {
    /// Backend used by every view.
    gateway: Arc<dyn FeedbackGateway>,
    /// Destination for telemetry events.
    telemetry: Arc<dyn TelemetrySink>,
    /// View receiving input and being rendered.
    pub(crate) active_view: ActiveView,
    /// Submission form state.
    pub(crate) form: FormState,
    /// Feedback list state.
    pub(crate) list: ListState,
    /// Dashboard state.
    pub(crate) dashboard: DashboardState,
    /// Bumped once per successful submission.
    pub(crate) refresh_signal: RefreshSignal,
    /// List component, which tracks the record window height.
    list_component: FeedbackListComponent,
    /// Terminal dimensions.
    width: u16,
    height: u16,
    /// Whether help overlay is visible.
    pub(crate) show_help: bool,
    /// Whether the startup message has already been handled.
    has_initialized: bool,
}

impl fmt::Debug for FeedbackApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackApp")
            .field("active_view", &self.active_view)
            .field("form", &self.form)
            .field("list", &self.list)
            .field("dashboard", &self.dashboard)
            .field("refresh_signal", &self.refresh_signal)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("show_help", &self.show_help)
            .finish_non_exhaustive()
    }
}

impl FeedbackApp {
    /// Creates an application that talks to `gateway`.
    #[must_use]
    pub fn new(gateway: Arc<dyn FeedbackGateway>) -> Self {
        let mut app = Self {
            gateway,
            telemetry: Arc::new(NoopTelemetrySink),
            active_view: ActiveView::default(),
            form: FormState::new(),
            list: ListState::default(),
            dashboard: DashboardState::default(),
            refresh_signal: RefreshSignal::new(),
            list_component: FeedbackListComponent::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            show_help: false,
            has_initialized: false,
        };
        app.update_list_height();
        app
    }

    /// Routes telemetry events to `sink`.
    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// Starts the list view with the given backend parameters and search.
    #[must_use]
    pub fn with_list_settings(mut self, settings: ListSettings) -> Self {
        self.list = ListState::new(settings.query, settings.search);
        self
    }

    /// Sets the terminal dimensions used for the first frame.
    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self.update_list_height();
        self
    }

    /// Returns the active view.
    #[must_use]
    pub const fn active_view(&self) -> ActiveView {
        self.active_view
    }

    /// Returns the submission form state.
    #[must_use]
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Returns the feedback list state.
    #[must_use]
    pub const fn list(&self) -> &ListState {
        &self.list
    }

    /// Returns the dashboard state.
    #[must_use]
    pub const fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    /// Returns the shared refresh signal.
    #[must_use]
    pub const fn refresh_signal(&self) -> RefreshSignal {
        self.refresh_signal
    }

    /// Returns `true` while the help overlay is shown.
    #[must_use]
    pub const fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Returns `true` while any backend call is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.form.is_submitting()
            || self.list.loading
            || self.dashboard.loading
            || self.dashboard.fixing
    }

    /// Handles a message and updates state accordingly.
    ///
    /// Messages are dispatched by category to the per-view handlers;
    /// anything left over is a lifecycle, polling, or window message.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_navigation() {
            return self.handle_navigation_msg(msg);
        }
        if msg.is_form() {
            return self.handle_form_msg(msg);
        }
        if msg.is_list() {
            return self.handle_list_msg(msg);
        }
        if msg.is_dashboard() {
            return self.handle_dashboard_msg(msg);
        }
        self.handle_lifecycle_msg(msg)
    }

    /// Dispatches view switching and cursor movement.
    fn handle_navigation_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if let AppMsg::ShowView(view) = msg {
            self.active_view = *view;
            return None;
        }
        if self.active_view != ActiveView::List {
            return None;
        }
        let page = self.list_component.visible_height().max(1);
        match msg {
            AppMsg::CursorUp => self.list.move_up(1),
            AppMsg::CursorDown => self.list.move_down(1),
            AppMsg::PageUp => self.list.move_up(page),
            AppMsg::PageDown => self.list.move_down(page),
            AppMsg::Home => self.list.home(),
            AppMsg::End => self.list.end(),
            _ => {
                debug_assert!(
                    false,
                    "non-navigation message routed to handle_navigation_msg"
                );
            }
        }
        self.list.ensure_cursor_visible(page);
        None
    }

    /// Dispatches lifecycle, polling, and window messages.
    fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Initialized => self.handle_initialized(),
            AppMsg::PollTick(target) => self.handle_poll_tick(*target),
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::EscapePressed => self.handle_escape(),
            AppMsg::WindowResized { width, height } => self.handle_resize(*width, *height),
            _ => {
                debug_assert!(
                    false,
                    "non-lifecycle message routed to handle_lifecycle_msg"
                );
                None
            }
        }
    }

    /// Dismisses whatever the active view is showing transiently.
    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_escape(&mut self) -> Option<Cmd> {
        match self.active_view {
            ActiveView::Form => self.dismiss_form_banner(),
            ActiveView::List => self.clear_search(),
            ActiveView::Dashboard => self.dashboard.fix_outcome = None,
        }
        None
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_resize(&mut self, width: u16, height: u16) -> Option<Cmd> {
        self.width = width;
        self.height = height;
        self.update_list_height();
        None
    }

    /// Recomputes how many records fit between the list chrome and the
    /// detail pane.
    fn update_list_height(&mut self) {
        let list_height = usize::from(self.height)
            .saturating_sub(CHROME_HEIGHT)
            .saturating_sub(LIST_CHROME_HEIGHT)
            .saturating_sub(DETAIL_HEIGHT)
            .max(MIN_LIST_HEIGHT);
        self.list_component.set_visible_height(list_height);
        self.list.ensure_cursor_visible(list_height);
    }
}
