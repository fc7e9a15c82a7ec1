use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use rideline_domain::events::BookingAccepted;
use rideline_domain::repository::BookingRepository;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

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

/// Applies one booking.accepted payload to the booking store.
pub async fn apply_accepted(repo: &dyn BookingRepository, payload: &[u8]) -> ApplyOutcome {
    let evt: BookingAccepted = match serde_json::from_slice(payload) {
        Ok(evt) => evt,
        Err(e) => {
            error!(error = %e, "dropping malformed booking.accepted payload");
            return ApplyOutcome::Poison;
        }
    };

    match repo.mark_accepted(evt.booking_id, &evt.driver_id).await {
        Ok(true) => {
            info!(booking_id = %evt.booking_id, driver_id = %evt.driver_id, "booking reconciled");
            ApplyOutcome::Applied
        }
        Ok(false) => {
            // Already Accepted, or the booking is not visible yet. Either
            // way the apply is idempotent and the offset may advance.
            debug!(booking_id = %evt.booking_id, "reconciliation no-op");
            ApplyOutcome::Applied
        }
        Err(e) => {
            error!(booking_id = %evt.booking_id, error = %e, "reconciliation write failed");
            ApplyOutcome::Retry
        }
    }
}

/// Booking Reconciliation Consumer: one fetch-apply-commit cycle at a
/// time, offset committed strictly after the write attempt succeeds.
pub async fn run_reconciliation(
    consumer: StreamConsumer,
    repo: Arc<dyn BookingRepository>,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("booking reconciliation consumer started");

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
                    match apply_accepted(repo.as_ref(), payload).await {
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

    info!("booking reconciliation consumer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeBookingRepo;
    use chrono::Utc;
    use rideline_domain::booking::{Booking, Location, RideStatus};
    use uuid::Uuid;

    fn requested_booking(booking_id: Uuid) -> Booking {
        Booking {
            booking_id,
            pickup: Location { lat: 12.9, lng: 77.6 },
            dropoff: Location { lat: 12.95, lng: 77.64 },
            price: 220,
            ride_status: RideStatus::Requested,
            driver_id: None,
            created_at: Utc::now(),
        }
    }

    fn accepted_payload(booking_id: Uuid, driver_id: &str) -> Vec<u8> {
        serde_json::to_vec(&BookingAccepted {
            booking_id,
            driver_id: driver_id.to_string(),
            ride_status: "Accepted".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn poison_payload_is_dropped_with_commit() {
        let repo = FakeBookingRepo::default();
        let outcome = apply_accepted(&repo, b"{ not json").await;
        assert_eq!(outcome, ApplyOutcome::Poison);
    }

    #[tokio::test]
    async fn accepted_event_transitions_the_booking() {
        let repo = FakeBookingRepo::default();
        let booking_id = Uuid::new_v4();
        repo.insert(requested_booking(booking_id));

        let outcome = apply_accepted(&repo, &accepted_payload(booking_id, "d-1")).await;

        assert_eq!(outcome, ApplyOutcome::Applied);
        let stored = repo.stored();
        assert_eq!(stored[0].ride_status, RideStatus::Accepted);
        assert_eq!(stored[0].driver_id.as_deref(), Some("d-1"));
    }

    #[tokio::test]
    async fn replayed_event_is_a_noop_not_an_error() {
        let repo = FakeBookingRepo::default();
        let booking_id = Uuid::new_v4();
        repo.insert(requested_booking(booking_id));

        let payload = accepted_payload(booking_id, "d-1");
        assert_eq!(apply_accepted(&repo, &payload).await, ApplyOutcome::Applied);
        // Second delivery updates zero rows and still advances.
        assert_eq!(apply_accepted(&repo, &payload).await, ApplyOutcome::Applied);

        let stored = repo.stored();
        assert_eq!(stored[0].driver_id.as_deref(), Some("d-1"));
    }

    #[tokio::test]
    async fn transient_failure_withholds_the_commit_until_retry_succeeds() {
        let repo = FakeBookingRepo::default();
        let booking_id = Uuid::new_v4();
        repo.insert(requested_booking(booking_id));
        repo.set_write_failure(true);

        let payload = accepted_payload(booking_id, "d-1");
        assert_eq!(apply_accepted(&repo, &payload).await, ApplyOutcome::Retry);

        // Store healthy again: the redelivered message applies cleanly.
        repo.set_write_failure(false);
        assert_eq!(apply_accepted(&repo, &payload).await, ApplyOutcome::Applied);
        assert_eq!(repo.stored()[0].ride_status, RideStatus::Accepted);
    }
}
