//! One-shot sentiment maintenance operation.

use std::io::{self, Write};

use tracing::info;
use ulasan::telemetry::{TelemetryEvent, TelemetrySink};
use ulasan::{ApiError, FeedbackGateway, HttpFeedbackGateway, UlasanConfig};

use super::output::write_fix_report;

/// Asks the backend to recompute stored sentiments and prints the result.
///
/// # Errors
///
/// Returns any transport, status, or decode error raised by the request.
pub async fn run(config: &UlasanConfig, telemetry: &dyn TelemetrySink) -> Result<(), ApiError> {
    let gateway = HttpFeedbackGateway::new(config.api_url())?;
    let mut stdout = io::stdout().lock();
    run_with_gateway(&gateway, telemetry, &mut stdout).await
}

/// Runs the maintenance action using the given gateway and writer.
pub async fn run_with_gateway<G, W>(
    gateway: &G,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), ApiError>
where
    G: FeedbackGateway + ?Sized,
    W: Write,
{
    let report = gateway.fix_sentiments().await?;
    info!(updated = report.updated_count, "sentiments recomputed");
    telemetry.record(TelemetryEvent::SentimentsFixed {
        updated_count: report.updated_count,
    });

    write_fix_report(writer, &report)
}
