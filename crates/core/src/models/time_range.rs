use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::appointment::Appointment;

/// Bounds for schedule queries and conflict checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The span an appointment occupies.
    pub fn of(appointment: &Appointment) -> Self {
        Self::new(appointment.starts_at, appointment.ends_at)
    }

    /// Containment, not overlap: both ends of the appointment must fall
    /// inside the range, edges included.
    pub fn contains(&self, appointment: &Appointment) -> bool {
        appointment.starts_at >= self.start && appointment.ends_at <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}
