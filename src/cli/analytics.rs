//! One-shot analytics summary operation.

use std::io::{self, Write};
use std::time::Instant;

use ulasan::telemetry::{FetchSource, TelemetryEvent, TelemetrySink, elapsed_ms};
use ulasan::{ApiError, FeedbackGateway, HttpFeedbackGateway, UlasanConfig};

use super::output::write_analytics_summary;

/// Prints the backend's analytics snapshot.
///
/// # Errors
///
/// Returns any transport, status, or decode error raised by the request.
pub async fn run(config: &UlasanConfig, telemetry: &dyn TelemetrySink) -> Result<(), ApiError> {
    let gateway = HttpFeedbackGateway::new(config.api_url())?;
    let mut stdout = io::stdout().lock();
    run_with_gateway(&gateway, telemetry, &mut stdout).await
}

/// Prints the analytics snapshot using the given gateway and writer.
pub async fn run_with_gateway<G, W>(
    gateway: &G,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), ApiError>
where
    G: FeedbackGateway + ?Sized,
    W: Write,
{
    let started = Instant::now();
    let snapshot = gateway.analytics().await?;
    telemetry.record(TelemetryEvent::FetchLatencyRecorded {
        source: FetchSource::Dashboard,
        latency_ms: elapsed_ms(started),
        item_count: snapshot.recent_feedback.len(),
    });

    write_analytics_summary(writer, &snapshot)
}
