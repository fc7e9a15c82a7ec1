use async_trait::async_trait;
use rideline_domain::events::BookingAccepted;
use rideline_domain::repository::BoxError;
use rideline_infra::EventProducer;
use std::sync::Arc;

#[async_trait]
pub trait AcceptedEventProducer: Send + Sync {
    async fn publish_booking_accepted(&self, evt: &BookingAccepted) -> Result<(), BoxError>;
}

/// Publishes booking.accepted keyed by booking id, preserving per-booking
/// ordering on the bus.
pub struct KafkaAcceptedProducer {
    producer: Arc<EventProducer>,
    topic: String,
}

impl KafkaAcceptedProducer {
    pub fn new(producer: Arc<EventProducer>, topic: impl Into<String>) -> Self {
        Self { producer, topic: topic.into() }
    }
}

#[async_trait]
impl AcceptedEventProducer for KafkaAcceptedProducer {
    async fn publish_booking_accepted(&self, evt: &BookingAccepted) -> Result<(), BoxError> {
        let payload = serde_json::to_vec(evt)?;
        self.producer
            .publish(&self.topic, &evt.booking_id.to_string(), &payload)
            .await?;
        Ok(())
    }
}
