use crate::producer::AcceptedEventProducer;
use async_trait::async_trait;
use rideline_domain::driver::Driver;
use rideline_domain::events::BookingAccepted;
use rideline_domain::job::Job;
use rideline_domain::repository::{BoxError, DriverRepository, JobRepository};
use rideline_domain::RideStatus;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum AcceptError {
    #[error("driver not found or unavailable")]
    DriverNotFound,
    #[error("job already taken")]
    JobAlreadyTaken,
    #[error("storage failure: {0}")]
    Storage(#[source] BoxError),
    #[error("event publish failure: {0}")]
    Publish(#[source] BoxError),
}

#[async_trait]
pub trait JobsService: Send + Sync {
    async fn list_drivers(&self) -> Result<Vec<Driver>, BoxError>;
    async fn list_open_jobs(&self) -> Result<Vec<Job>, BoxError>;
    async fn accept_job(&self, booking_id: Uuid, driver_id: &str) -> Result<(), AcceptError>;
}

pub struct Jobs {
    drivers: Arc<dyn DriverRepository>,
    jobs: Arc<dyn JobRepository>,
    producer: Arc<dyn AcceptedEventProducer>,
}

impl Jobs {
    pub fn new(
        drivers: Arc<dyn DriverRepository>,
        jobs: Arc<dyn JobRepository>,
        producer: Arc<dyn AcceptedEventProducer>,
    ) -> Self {
        Self { drivers, jobs, producer }
    }
}

#[async_trait]
impl JobsService for Jobs {
    async fn list_drivers(&self) -> Result<Vec<Driver>, BoxError> {
        self.drivers.list_all().await
    }

    async fn list_open_jobs(&self) -> Result<Vec<Job>, BoxError> {
        self.jobs.list_open().await
    }

    async fn accept_job(&self, booking_id: Uuid, driver_id: &str) -> Result<(), AcceptError> {
        let driver = self
            .drivers
            .get(driver_id)
            .await
            .map_err(AcceptError::Storage)?;
        match driver {
            Some(d) if d.is_available => {}
            _ => return Err(AcceptError::DriverNotFound),
        }

        // At most one caller wins the conditional update; everyone else
        // lands here with zero rows affected and publishes nothing.
        let won = self
            .jobs
            .try_accept(booking_id, driver_id)
            .await
            .map_err(AcceptError::Storage)?;
        if !won {
            return Err(AcceptError::JobAlreadyTaken);
        }

        let evt = BookingAccepted {
            booking_id,
            driver_id: driver_id.to_string(),
            ride_status: RideStatus::Accepted.to_string(),
        };

        // The claim is durable by now and is not rolled back on a failed
        // publish; the booking side simply has not been told yet.
        self.producer
            .publish_booking_accepted(&evt)
            .await
            .map_err(AcceptError::Publish)?;

        info!(%booking_id, driver_id, "job accepted");
        Ok(())
    }
}
