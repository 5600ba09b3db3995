//! Availability slots and their booking state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::AppError;

/// Booking state of a slot.
///
/// ```text
/// Open --book--> Booked --cancel--> Open
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum AvailabilityStatus {
    #[default]
    Open,
    Booked,
}

impl AvailabilityStatus {
    pub const ALL: [AvailabilityStatus; 2] = [AvailabilityStatus::Open, AvailabilityStatus::Booked];

    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Open => "Open",
            AvailabilityStatus::Booked => "Booked",
        }
    }

    pub fn can_transition_to(&self, next: AvailabilityStatus) -> bool {
        matches!(
            (self, next),
            (AvailabilityStatus::Open, AvailabilityStatus::Booked)
                | (AvailabilityStatus::Booked, AvailabilityStatus::Open)
        )
    }

    /// States from which `target` may be entered.
    pub fn sources_of(target: AvailabilityStatus) -> Vec<AvailabilityStatus> {
        Self::ALL
            .into_iter()
            .filter(|from| from.can_transition_to(target))
            .collect()
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(AvailabilityStatus::Open),
            "Booked" => Ok(AvailabilityStatus::Booked),
            other => Err(AppError::validation(format!(
                "invalid availability status '{}', expected Open or Booked",
                other
            ))),
        }
    }
}

/// One bookable window for a salon and service.
///
/// Start and end are stored as given; range queries compare them as strings,
/// so callers should send uniform ISO-8601 values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Availability {
    #[serde(default)]
    #[schema(example = 1)]
    pub availability_id: i32,
    #[schema(example = 5)]
    pub salon_id: i32,
    #[schema(example = 12)]
    pub service_id: i32,
    #[validate(length(min = 1, message = "start_date_time is required"))]
    #[schema(example = "2023-07-10T10:00:00Z")]
    pub start_date_time: String,
    #[validate(length(min = 1, message = "end_date_time is required"))]
    #[schema(example = "2023-07-10T11:00:00Z")]
    pub end_date_time: String,
    #[serde(default)]
    pub status: AvailabilityStatus,
}
