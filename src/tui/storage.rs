//! Startup context storage for the feedback TUI.
//!
//! `bubbletea_rs::Model::init()` is a static function, so everything the app
//! needs at startup is placed in module-level `OnceLock` values by the CLI
//! before the program runs and read back by `FeedbackApp::init()`.

use std::sync::{Arc, OnceLock};

use crossterm::terminal;

use crate::api::gateway::{FeedbackGateway, UnconfiguredGateway};
use crate::api::query::FeedbackQuery;
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};

/// Backend gateway shared by every view.
static GATEWAY: OnceLock<Arc<dyn FeedbackGateway>> = OnceLock::new();

/// Initial terminal dimensions, so the first frame fits the real terminal.
static INITIAL_TERMINAL_SIZE: OnceLock<(u16, u16)> = OnceLock::new();

/// Initial server-side parameters and search term for the list view.
static INITIAL_LIST_SETTINGS: OnceLock<ListSettings> = OnceLock::new();

/// Telemetry sink used by the running app.
static TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Static fallback telemetry sink to avoid allocations on each call.
static DEFAULT_TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Starting parameters for the feedback list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSettings {
    /// Backend filter and sort parameters.
    pub query: FeedbackQuery,
    /// Local free-text search term.
    pub search: String,
}

/// Sets the gateway used for every backend call.
///
/// Must be called before starting the bubbletea-rs program. Without it every
/// fetch fails with a configuration error.
///
/// # Returns
///
/// `true` if the gateway was set, `false` if it was already set.
pub fn set_gateway(gateway: Arc<dyn FeedbackGateway>) -> bool {
    GATEWAY.set(gateway).is_ok()
}

/// Sets the initial terminal dimensions.
///
/// # Returns
///
/// `true` if the dimensions were set, `false` if they were already set.
pub fn set_initial_terminal_size(width: u16, height: u16) -> bool {
    INITIAL_TERMINAL_SIZE.set((width, height)).is_ok()
}

/// Sets the initial list parameters and search term.
///
/// # Returns
///
/// `true` if the settings were set, `false` if they were already set.
pub fn set_initial_list_settings(query: FeedbackQuery, search: String) -> bool {
    INITIAL_LIST_SETTINGS
        .set(ListSettings { query, search })
        .is_ok()
}

/// Sets the telemetry sink. Without it a no-op sink is used.
///
/// # Returns
///
/// `true` if the sink was set, `false` if it was already set.
pub fn set_telemetry_sink(sink: Arc<dyn TelemetrySink>) -> bool {
    TELEMETRY_SINK.set(sink).is_ok()
}

/// Gets the configured gateway, or one that reports it is unconfigured.
pub(crate) fn get_gateway() -> Arc<dyn FeedbackGateway> {
    GATEWAY
        .get()
        .cloned()
        .unwrap_or_else(|| Arc::new(UnconfiguredGateway))
}

/// Gets the telemetry sink, returning a shared no-op sink if not configured.
pub(crate) fn get_telemetry_sink() -> Arc<dyn TelemetrySink> {
    TELEMETRY_SINK.get().cloned().unwrap_or_else(|| {
        Arc::clone(DEFAULT_TELEMETRY_SINK.get_or_init(|| Arc::new(NoopTelemetrySink)))
    })
}

/// Gets a clone of the initial list settings, or the defaults.
pub(crate) fn get_initial_list_settings() -> ListSettings {
    INITIAL_LIST_SETTINGS.get().cloned().unwrap_or_default()
}

/// Gets the initial terminal dimensions.
///
/// Falls back to the live terminal size and then to 80x24.
pub(crate) fn get_initial_terminal_size() -> (u16, u16) {
    const DEFAULT_WIDTH: u16 = 80;
    const DEFAULT_HEIGHT: u16 = 24;

    INITIAL_TERMINAL_SIZE
        .get()
        .copied()
        .filter(|(width, height)| *width > 0 && *height > 0)
        .or_else(|| {
            terminal::size()
                .ok()
                .filter(|(width, height)| *width > 0 && *height > 0)
        })
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}
