//! Ulasan CLI entrypoint for the patient feedback client.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use ulasan::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use ulasan::{ApiError, OperationMode, UlasanConfig};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ApiError> {
    let config = load_config()?;
    config.validate()?;

    let telemetry = telemetry_sink(&config);

    match config.operation_mode() {
        OperationMode::ListFeedback => cli::list_feedback::run(&config, telemetry.as_ref()).await,
        OperationMode::ShowAnalytics => cli::analytics::run(&config, telemetry.as_ref()).await,
        OperationMode::FixSentiments => {
            cli::fix_sentiments::run(&config, telemetry.as_ref()).await
        }
        OperationMode::Interactive => cli::interactive::run(&config, telemetry).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<UlasanConfig, ApiError> {
    UlasanConfig::load().map_err(|error| ApiError::Configuration {
        message: error.to_string(),
    })
}

fn telemetry_sink(config: &UlasanConfig) -> Arc<dyn TelemetrySink> {
    if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    }
}
