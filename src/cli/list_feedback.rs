//! One-shot feedback listing operation.

use std::io::{self, Write};
use std::time::Instant;

use ulasan::telemetry::{FetchSource, TelemetryEvent, TelemetrySink, elapsed_ms};
use ulasan::{ApiError, FeedbackGateway, HttpFeedbackGateway, UlasanConfig};

use super::output::write_feedback_list;

/// Prints the feedback list matching the configured filters.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] for invalid filter values and any
/// transport or decode error raised by the request.
pub async fn run(config: &UlasanConfig, telemetry: &dyn TelemetrySink) -> Result<(), ApiError> {
    let gateway = HttpFeedbackGateway::new(config.api_url())?;
    let mut stdout = io::stdout().lock();
    run_with_gateway(config, &gateway, telemetry, &mut stdout).await
}

/// Prints the feedback list using the given gateway and writer.
///
/// This function is exposed for testing against a stub server.
pub async fn run_with_gateway<G, W>(
    config: &UlasanConfig,
    gateway: &G,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), ApiError>
where
    G: FeedbackGateway + ?Sized,
    W: Write,
{
    let query = config.list_query()?;

    let started = Instant::now();
    let items = gateway.list_feedback(&query).await?;
    telemetry.record(TelemetryEvent::FetchLatencyRecorded {
        source: FetchSource::FeedbackList,
        latency_ms: elapsed_ms(started),
        item_count: items.len(),
    });

    write_feedback_list(writer, &items, &query, config.search_term())
}
