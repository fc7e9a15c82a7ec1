pub mod booking;
pub mod driver;
pub mod events;
pub mod job;
pub mod repository;

pub use booking::{Booking, CreateBookingInput, Location, RideStatus, ValidationError};
pub use driver::Driver;
pub use events::{BookingAccepted, BookingCreated};
pub use job::{Job, JobStatus};
