use chrono::{DateTime, Utc};
use eyre::{Report, eyre};
use serde::{Deserialize, Serialize};
use slotkeeper_core::models::appointment::Appointment;
use sqlx::FromRow;

/// An appointments row. Times are whole Unix seconds; sub-second precision
/// and the original offset are not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: String,
    pub trainer_id: String,
    pub user_id: String,
    pub starts_at: i64,
    pub ends_at: i64,
}

impl From<&Appointment> for DbAppointment {
    fn from(apt: &Appointment) -> Self {
        Self {
            id: apt.id.clone(),
            trainer_id: apt.trainer_id.clone(),
            user_id: apt.user_id.clone(),
            starts_at: apt.starts_at.timestamp(),
            ends_at: apt.ends_at.timestamp(),
        }
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = Report;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            starts_at: from_epoch(row.starts_at)?,
            ends_at: from_epoch(row.ends_at)?,
            id: row.id,
            trainer_id: row.trainer_id,
            user_id: row.user_id,
        })
    }
}

fn from_epoch(seconds: i64) -> eyre::Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| eyre!("stored timestamp {} is out of range", seconds))
}
