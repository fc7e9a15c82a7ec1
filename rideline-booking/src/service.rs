use crate::producer::CreatedEventProducer;
use async_trait::async_trait;
use rideline_domain::booking::{Booking, CreateBookingInput, RideStatus, ValidationError};
use rideline_domain::events::BookingCreated;
use rideline_domain::repository::{BookingRepository, BoxError, CreateBookingParams};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CreateBookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage failure: {0}")]
    Storage(#[source] BoxError),
    #[error("event publish failure: {0}")]
    Publish(#[source] BoxError),
}

#[async_trait]
pub trait BookingService: Send + Sync {
    async fn create_booking(&self, input: CreateBookingInput) -> Result<Booking, CreateBookingError>;
    async fn list_bookings(&self) -> Result<Vec<Booking>, BoxError>;
}

pub struct Bookings {
    repo: Arc<dyn BookingRepository>,
    producer: Arc<dyn CreatedEventProducer>,
}

impl Bookings {
    pub fn new(repo: Arc<dyn BookingRepository>, producer: Arc<dyn CreatedEventProducer>) -> Self {
        Self { repo, producer }
    }
}

#[async_trait]
impl BookingService for Bookings {
    async fn create_booking(&self, input: CreateBookingInput) -> Result<Booking, CreateBookingError> {
        input.validate()?;

        let created = self
            .repo
            .create(CreateBookingParams {
                booking_id: Uuid::new_v4(),
                pickup: input.pickup,
                dropoff: input.dropoff,
                price: input.price,
                ride_status: RideStatus::Requested,
                driver_id: None,
            })
            .await
            .map_err(CreateBookingError::Storage)?;

        let evt = BookingCreated {
            booking_id: created.booking_id,
            pickup: created.pickup,
            dropoff: created.dropoff,
            price: created.price,
            ride_status: created.ride_status.to_string(),
        };

        // No booking without an announced event: if the publish fails the
        // request fails, even though the row already exists. The row is
        // kept; it is an unannounced booking until reconciled.
        self.producer
            .publish_booking_created(&evt)
            .await
            .map_err(CreateBookingError::Publish)?;

        info!(booking_id = %created.booking_id, "booking created");
        Ok(created)
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, BoxError> {
        self.repo.list_all().await
    }
}
