//! Appointments and their status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::AppError;

/// Appointment lifecycle.
///
/// ```text
/// Pending --confirm--> Confirmed
///    |                    |
///    +------cancel--------+--> Cancelled (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (AppointmentStatus::Pending, AppointmentStatus::Confirmed)
                | (AppointmentStatus::Pending, AppointmentStatus::Cancelled)
                | (AppointmentStatus::Confirmed, AppointmentStatus::Cancelled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled)
    }

    /// States from which `target` may be entered.
    pub fn sources_of(target: AppointmentStatus) -> Vec<AppointmentStatus> {
        Self::ALL
            .into_iter()
            .filter(|from| from.can_transition_to(target))
            .collect()
    }

    /// States in which the appointment time may still change.
    pub fn reschedulable() -> Vec<AppointmentStatus> {
        Self::ALL.into_iter().filter(|s| !s.is_terminal()).collect()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(AppointmentStatus::Pending),
            "Confirmed" => Ok(AppointmentStatus::Confirmed),
            "Cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(AppError::validation(format!(
                "invalid appointment status '{}', expected Pending, Confirmed or Cancelled",
                other
            ))),
        }
    }
}

/// A user's reservation at a salon for one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Appointment {
    #[serde(default)]
    #[schema(example = 1)]
    pub appointment_id: i32,
    #[schema(example = 3)]
    pub user_id: i32,
    #[schema(example = 5)]
    pub salon_id: i32,
    #[schema(example = 12)]
    pub service_id: i32,
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub status: AppointmentStatus,
    /// Free text channel preference, e.g. "email" or "sms"
    #[serde(default)]
    #[schema(example = "email")]
    pub notification_settings: String,
}
