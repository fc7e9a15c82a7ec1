use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RideStatus {
    Requested,
    Accepted,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Requested => "Requested",
            RideStatus::Accepted => "Accepted",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown ride status: {0}")]
pub struct UnknownRideStatus(pub String);

impl FromStr for RideStatus {
    type Err = UnknownRideStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Requested" => Ok(RideStatus::Requested),
            "Accepted" => Ok(RideStatus::Accepted),
            other => Err(UnknownRideStatus(other.to_string())),
        }
    }
}

/// A ride booking as owned by the booking service. `driver_id` is set
/// exactly when the ride has been accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: Uuid,
    #[serde(rename = "pickuploc")]
    pub pickup: Location,
    pub dropoff: Location,
    pub price: i32,
    pub ride_status: RideStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateBookingInput {
    #[serde(rename = "pickuploc")]
    pub pickup: Location,
    pub dropoff: Location,
    pub price: i32,
}

#[derive(Debug, thiserror::Error)]
#[error("validation failed: {}", .problems.join("; "))]
pub struct ValidationError {
    pub problems: Vec<String>,
}

impl CreateBookingInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut problems = Vec::new();

        if !(-90.0..=90.0).contains(&self.pickup.lat) {
            problems.push("pickuploc.lat must be between -90 and 90".to_string());
        }
        if !(-180.0..=180.0).contains(&self.pickup.lng) {
            problems.push("pickuploc.lng must be between -180 and 180".to_string());
        }
        if !(-90.0..=90.0).contains(&self.dropoff.lat) {
            problems.push("dropoff.lat must be between -90 and 90".to_string());
        }
        if !(-180.0..=180.0).contains(&self.dropoff.lng) {
            problems.push("dropoff.lng must be between -180 and 180".to_string());
        }
        if self.price <= 0 {
            problems.push("price must be > 0".to_string());
        }
        if self.pickup == self.dropoff {
            problems.push("pickuploc and dropoff cannot be the same".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { problems })
        }
    }
}
