use crate::booking::{Booking, Location, RideStatus};
use crate::driver::Driver;
use crate::job::Job;
use async_trait::async_trait;
use std::error::Error;
use uuid::Uuid;

pub type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone)]
pub struct CreateBookingParams {
    pub booking_id: Uuid,
    pub pickup: Location,
    pub dropoff: Location,
    pub price: i32,
    pub ride_status: RideStatus,
    pub driver_id: Option<String>,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, params: CreateBookingParams) -> Result<Booking, BoxError>;

    /// All bookings, newest first.
    async fn list_all(&self) -> Result<Vec<Booking>, BoxError>;

    /// Sets ride_status=Accepted and the driver if currently Requested.
    /// Returns true if the row was updated, false if already Accepted or
    /// missing (idempotent no-op).
    async fn mark_accepted(&self, booking_id: Uuid, driver_id: &str) -> Result<bool, BoxError>;
}

#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Driver>, BoxError>;
    async fn get(&self, driver_id: &str) -> Result<Option<Driver>, BoxError>;
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub booking_id: Uuid,
    pub pickup: Location,
    pub dropoff: Location,
    pub price: i32,
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Inserts an Open job if none exists for the booking id; an existing
    /// row is a silent no-op.
    async fn insert_open_job(&self, job: NewJob) -> Result<(), BoxError>;

    /// Open jobs only, newest first.
    async fn list_open(&self) -> Result<Vec<Job>, BoxError>;

    /// Atomically marks the job Taken if it is currently Open. Returns
    /// true if this caller won the claim, false if it was already taken.
    async fn try_accept(&self, booking_id: Uuid, driver_id: &str) -> Result<bool, BoxError>;
}
