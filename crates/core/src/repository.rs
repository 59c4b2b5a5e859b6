use async_trait::async_trait;

use crate::{
    errors::AppointmentResult,
    models::{appointment::Appointment, time_range::TimeRange},
};

/// Storage for appointments and the only place double-booking is prevented.
///
/// `create` must check for a conflicting appointment and insert the new one
/// atomically with respect to other writers for the same trainer. It returns
/// `ScheduleConflict` when an appointment for the trainer is contained in the
/// proposed span and `IdTaken` when the id is already stored.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, appointment: &Appointment) -> AppointmentResult<()>;

    async fn get_by_trainer(&self, trainer_id: &str) -> AppointmentResult<Vec<Appointment>>;

    /// Appointments for the trainer fully contained in `range`.
    async fn get_by_trainer_in_range(
        &self,
        trainer_id: &str,
        range: &TimeRange,
    ) -> AppointmentResult<Vec<Appointment>>;
}
