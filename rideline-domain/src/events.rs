use crate::booking::Location;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Published once per booking on `booking.created`, keyed by the booking
/// id. Carries the exact values that were persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreated {
    pub booking_id: Uuid,
    #[serde(rename = "pickuploc")]
    pub pickup: Location,
    pub dropoff: Location,
    pub price: i32,
    pub ride_status: String,
}

/// Published once per won claim on `booking.accepted`, keyed by the
/// booking id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingAccepted {
    pub booking_id: Uuid,
    pub driver_id: String,
    pub ride_status: String,
}
