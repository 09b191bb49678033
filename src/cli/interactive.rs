//! Full-screen interactive client.
//!
//! This module provides the entry point for the terminal client with the
//! submission form, the feedback list, and the analytics dashboard.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;
use crossterm::terminal;

use ulasan::telemetry::TelemetrySink;
use ulasan::tui::{
    FeedbackApp, set_gateway, set_initial_list_settings, set_initial_terminal_size,
    set_telemetry_sink,
};
use ulasan::{ApiError, HttpFeedbackGateway, UlasanConfig};

/// Runs the interactive client against the configured backend.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] for invalid filter values or an
/// unusable base URL, and [`ApiError::Io`] if the terminal program fails.
pub async fn run(
    config: &UlasanConfig,
    telemetry: Arc<dyn TelemetrySink>,
) -> Result<(), ApiError> {
    let gateway = HttpFeedbackGateway::new(config.api_url())?;
    let query = config.list_query()?;

    // Store startup context for Model::init() to retrieve. If already set,
    // the existing values remain.
    let _ = set_gateway(Arc::new(gateway));
    let _ = set_initial_list_settings(query, config.search_term().to_owned());
    let _ = set_telemetry_sink(telemetry);
    if let Ok((width, height)) = terminal::size() {
        let _ = set_initial_terminal_size(width, height);
    }

    run_tui().await.map_err(|error| ApiError::Io {
        message: format!("TUI error: {error}"),
    })
}

/// Runs the bubbletea-rs program with the `FeedbackApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    let program = Program::<FeedbackApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
