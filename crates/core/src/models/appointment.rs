use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppointmentError, AppointmentResult};

/// A booked slot between a trainer and a user.
///
/// Appointments are written once and never updated or deleted. A missing
/// `starts_at`/`ends_at` is represented by [`unset_instant`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub trainer_id: String,
    pub user_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        id: impl Into<String>,
        trainer_id: impl Into<String>,
        user_id: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            trainer_id: trainer_id.into(),
            user_id: user_id.into(),
            starts_at,
            ends_at,
        }
    }

    /// Copy of this appointment at the precision storage keeps (whole seconds).
    pub fn truncated(&self) -> Self {
        Self {
            starts_at: self.starts_at.trunc_subsecs(0),
            ends_at: self.ends_at.trunc_subsecs(0),
            ..self.clone()
        }
    }
}

/// Seconds from the Unix epoch back to 0001-01-01T00:00:00Z.
pub const UNSET_TIMESTAMP: i64 = -62_135_596_800;

/// The instant that stands for "no time given": midnight UTC on 1 January of
/// year 1. The Unix epoch is an ordinary, valid instant.
pub fn unset_instant() -> DateTime<Utc> {
    DateTime::from_timestamp(UNSET_TIMESTAMP, 0).expect("year 1 is within chrono's range")
}

/// Returns true when `instant` is the unset value.
pub fn is_unset(instant: &DateTime<Utc>) -> bool {
    instant.timestamp() == UNSET_TIMESTAMP && instant.timestamp_subsec_nanos() == 0
}

/// Body of a create request as it arrives over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub trainer_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl AppointmentRequest {
    /// Checks the fields every appointment needs and assigns an id when none
    /// was supplied. Scheduling rules are left to the service.
    pub fn into_appointment(self) -> AppointmentResult<Appointment> {
        if self.trainer_id.trim().is_empty() {
            return Err(AppointmentError::Validation("trainer is required".to_string()));
        }

        if self.user_id.trim().is_empty() {
            return Err(AppointmentError::Validation("user is required".to_string()));
        }

        let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at) else {
            return Err(AppointmentError::Validation("time range is required".to_string()));
        };

        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => Uuid::new_v4().to_string(),
        };

        Ok(Appointment {
            id,
            trainer_id: self.trainer_id,
            user_id: self.user_id,
            starts_at,
            ends_at,
        })
    }
}
