use async_trait::async_trait;
use rideline_domain::events::BookingCreated;
use rideline_domain::repository::BoxError;
use rideline_infra::EventProducer;
use std::sync::Arc;

#[async_trait]
pub trait CreatedEventProducer: Send + Sync {
    async fn publish_booking_created(&self, evt: &BookingCreated) -> Result<(), BoxError>;
}

/// Publishes booking.created keyed by booking id, preserving per-booking
/// ordering on the bus.
pub struct KafkaCreatedProducer {
    producer: Arc<EventProducer>,
    topic: String,
}

impl KafkaCreatedProducer {
    pub fn new(producer: Arc<EventProducer>, topic: impl Into<String>) -> Self {
        Self { producer, topic: topic.into() }
    }
}

#[async_trait]
impl CreatedEventProducer for KafkaCreatedProducer {
    async fn publish_booking_created(&self, evt: &BookingCreated) -> Result<(), BoxError> {
        let payload = serde_json::to_vec(evt)?;
        self.producer
            .publish(&self.topic, &evt.booking_id.to_string(), &payload)
            .await?;
        Ok(())
    }
}
