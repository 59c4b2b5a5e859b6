//! In-process appointment store used by tests and local runs.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use eyre::eyre;

use crate::{
    errors::{AppointmentError, AppointmentResult},
    models::{appointment::Appointment, time_range::TimeRange},
    repository::AppointmentRepository,
};

/// Keeps appointments in a vector behind a mutex. Applies the same
/// containment rule and second precision as the SQL repository.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentRepository {
    appointments: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: Mutex::new(appointments.iter().map(Appointment::truncated).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.appointments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn select<P>(&self, predicate: P) -> AppointmentResult<Vec<Appointment>>
    where
        P: Fn(&Appointment) -> bool,
    {
        let rows = self
            .appointments
            .lock()
            .map_err(|_| eyre!("appointment store lock poisoned"))?;

        Ok(rows.iter().filter(|apt| predicate(apt)).cloned().collect())
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn create(&self, appointment: &Appointment) -> AppointmentResult<()> {
        let stored = appointment.truncated();
        let mut rows = self
            .appointments
            .lock()
            .map_err(|_| eyre!("appointment store lock poisoned"))?;

        let span = TimeRange::of(&stored);
        if rows
            .iter()
            .any(|apt| apt.trainer_id == stored.trainer_id && span.contains(apt))
        {
            return Err(AppointmentError::ScheduleConflict);
        }

        if rows.iter().any(|apt| apt.id == stored.id) {
            return Err(AppointmentError::IdTaken);
        }

        rows.push(stored);
        Ok(())
    }

    async fn get_by_trainer(&self, trainer_id: &str) -> AppointmentResult<Vec<Appointment>> {
        self.select(|apt| apt.trainer_id == trainer_id)
    }

    async fn get_by_trainer_in_range(
        &self,
        trainer_id: &str,
        range: &TimeRange,
    ) -> AppointmentResult<Vec<Appointment>> {
        self.select(|apt| apt.trainer_id == trainer_id && range.contains(apt))
    }
}
