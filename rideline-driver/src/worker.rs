use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use rideline_domain::events::BookingCreated;
use rideline_domain::repository::{JobRepository, NewJob};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// What to do with the offset after a message has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Write done (or idempotent no-op); commit the offset.
    Applied,
    /// Undecodable payload; commit the offset and drop the message.
    Poison,
    /// Transient store failure; withhold the commit so the message is
    /// redelivered on restart or rebalance.
    Retry,
}

/// Applies one booking.created payload to the job store.
pub async fn apply_created(jobs: &dyn JobRepository, payload: &[u8]) -> ApplyOutcome {
    let evt: BookingCreated = match serde_json::from_slice(payload) {
        Ok(evt) => evt,
        Err(e) => {
            error!(error = %e, "dropping malformed booking.created payload");
            return ApplyOutcome::Poison;
        }
    };

    let job = NewJob {
        booking_id: evt.booking_id,
        pickup: evt.pickup,
        dropoff: evt.dropoff,
        price: evt.price,
    };

    match jobs.insert_open_job(job).await {
        Ok(()) => {
            info!(booking_id = %evt.booking_id, "job materialized");
            ApplyOutcome::Applied
        }
        Err(e) => {
            error!(booking_id = %evt.booking_id, error = %e, "job upsert failed");
            ApplyOutcome::Retry
        }
    }
}

/// Job Materialization Consumer: one fetch-apply-commit cycle at a time,
/// offset committed strictly after the write attempt succeeds.
pub async fn run_materializer(
    consumer: StreamConsumer,
    jobs: Arc<dyn JobRepository>,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("job materialization consumer started");

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            received = consumer.recv() => match received {
                Err(e) => {
                    error!(error = %e, "kafka fetch failed");
                    sleep(Duration::from_millis(500)).await;
                }
                Ok(message) => {
                    let payload = message.payload().unwrap_or_default();
                    match apply_created(jobs.as_ref(), payload).await {
                        ApplyOutcome::Applied | ApplyOutcome::Poison => {
                            if let Err(e) = consumer.commit_message(&message, CommitMode::Async) {
                                warn!(error = %e, "offset commit failed; message may be redelivered");
                            }
                        }
                        ApplyOutcome::Retry => {}
                    }
                }
            }
        }
    }

    info!("job materialization consumer stopped");
}
