use crate::service::BookingService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<dyn BookingService>,
}
