pub mod app_config;
pub mod booking_repo;
pub mod bootstrap;
pub mod database;
pub mod driver_repo;
pub mod events;
pub mod job_repo;

pub use app_config::Config;
pub use booking_repo::PgBookingRepository;
pub use database::DbClient;
pub use driver_repo::PgDriverRepository;
pub use events::EventProducer;
pub use job_repo::PgJobRepository;
