use crate::booking::Location;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    Taken,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "Open",
            JobStatus::Taken => "Taken",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown job status: {0}")]
pub struct UnknownJobStatus(pub String);

impl FromStr for JobStatus {
    type Err = UnknownJobStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(JobStatus::Open),
            "Taken" => Ok(JobStatus::Taken),
            other => Err(UnknownJobStatus(other.to_string())),
        }
    }
}

/// The driver-side projection of a booking. Keyed by the originating
/// booking id; `accepted_driver_id` is set exactly when status is Taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub booking_id: Uuid,
    #[serde(rename = "pickuploc")]
    pub pickup: Location,
    pub dropoff: Location,
    pub price: i32,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_driver_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
