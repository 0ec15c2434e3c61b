//! Delivery of queued tracking events.
//!
//! Runs after the cart mutation has already happened. Every failure is
//! logged and counted; none is returned to the caller.

use futures::stream::{self, StreamExt};
use vitrine_core::{Channel, InMemoryOutbox, OutboxEntry, TrackingEvent};

use crate::client::StorefrontClient;
use crate::error::ClientError;

/// Maximum server relay requests in flight at once.
const RELAY_CONCURRENCY: usize = 4;

/// Client-side pixel integration.
pub trait PixelSink {
    /// # Errors
    ///
    /// Returns an error if the pixel rejected the event.
    fn track(&self, event: &TrackingEvent) -> Result<(), ClientError>;
}

/// Pixel sink that records each event in the log. Used where no browser
/// pixel exists, such as the CLI.
#[derive(Debug, Clone, Default)]
pub struct LogPixelSink {
    pub pixel_id: Option<String>,
}

impl PixelSink for LogPixelSink {
    fn track(&self, event: &TrackingEvent) -> Result<(), ClientError> {
        tracing::info!(
            pixel_id = self.pixel_id.as_deref().unwrap_or("none"),
            event = event.event_name.as_str(),
            event_id = %event.event_id,
            total = %event.total,
            "pixel event"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub pixel_sent: usize,
    pub server_sent: usize,
    pub failed: usize,
}

/// Drains `outbox` and delivers each entry to its channel.
pub async fn deliver(
    outbox: &InMemoryOutbox,
    pixel: &impl PixelSink,
    client: &StorefrontClient,
) -> DeliveryReport {
    let (pixel_entries, server_entries): (Vec<OutboxEntry>, Vec<OutboxEntry>) = outbox
        .drain()
        .into_iter()
        .partition(|e| e.channel == Channel::Pixel);

    let mut report = DeliveryReport::default();

    for entry in &pixel_entries {
        match pixel.track(&entry.event) {
            Ok(()) => report.pixel_sent += 1,
            Err(e) => {
                report.failed += 1;
                tracing::warn!(
                    event = entry.event.event_name.as_str(),
                    error = %e,
                    "pixel event failed"
                );
            }
        }
    }

    let results: Vec<(TrackingEvent, Result<(), ClientError>)> = stream::iter(server_entries)
        .map(|entry| async move {
            let result = client.send_server_event(&entry.event).await;
            (entry.event, result)
        })
        .buffer_unordered(RELAY_CONCURRENCY)
        .collect()
        .await;

    for (event, result) in results {
        match result {
            Ok(()) => report.server_sent += 1,
            Err(e) => {
                report.failed += 1;
                tracing::warn!(
                    event = event.event_name.as_str(),
                    event_id = %event.event_id,
                    error = %e,
                    "server relay event failed"
                );
            }
        }
    }

    tracing::debug!(
        pixel_sent = report.pixel_sent,
        server_sent = report.server_sent,
        failed = report.failed,
        "outbox delivered"
    );
    report
}
