use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Timelike, Utc};
use tracing::debug;

use crate::{
    config::SchedulePolicy,
    errors::{AppointmentError, AppointmentResult},
    models::{
        appointment::{Appointment, is_unset},
        time_range::TimeRange,
    },
    repository::AppointmentRepository,
};

/// Booking operations exposed to the transport layer.
#[async_trait]
pub trait AppointmentService: Send + Sync {
    async fn create(&self, appointment: Appointment) -> AppointmentResult<()>;

    async fn find_by_trainer_id(&self, trainer_id: &str) -> AppointmentResult<Vec<Appointment>>;

    async fn find_by_trainer_id_in_range(
        &self,
        trainer_id: &str,
        range: TimeRange,
    ) -> AppointmentResult<Vec<Appointment>>;
}

/// Validates requests against the [`SchedulePolicy`] before any of them
/// reach the repository. Holds no mutable state and is shared across tasks.
#[derive(Clone)]
pub struct SchedulingService {
    repository: Arc<dyn AppointmentRepository>,
    policy: SchedulePolicy,
}

impl SchedulingService {
    pub fn new(repository: Arc<dyn AppointmentRepository>, policy: SchedulePolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    fn ensure_valid_create_times(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppointmentResult<()> {
        ensure_times_set(start, end)?;

        let length = self.policy.appointment_length;
        let expected_end = start
            .checked_add_signed(length)
            .ok_or_else(|| AppointmentError::invalid_range("start time out of range"))?;
        if expected_end != end {
            debug!(
                starts_at = %start,
                ends_at = %end,
                expected_ends_at = %expected_end,
                "Invalid appointment length from consumer"
            );

            return Err(AppointmentError::invalid_range(format!(
                "invalid appointment length (must be {} minutes)",
                length.num_minutes()
            )));
        }

        let local_start = start.with_timezone(&self.policy.business_hours.location());
        if local_start.minute() % 30 != 0 {
            return Err(AppointmentError::invalid_range(
                "appointment must be scheduled on :00 or :30",
            ));
        }

        if start < Utc::now() {
            return Err(AppointmentError::invalid_range("appointment for the past"));
        }

        if !self.policy.business_hours.admits(start, end) {
            debug!(starts_at = %start, ends_at = %end, "Appointment outside business hours");
            return Err(AppointmentError::OutsideBusinessHours);
        }

        Ok(())
    }
}

#[async_trait]
impl AppointmentService for SchedulingService {
    async fn create(&self, appointment: Appointment) -> AppointmentResult<()> {
        self.ensure_valid_create_times(appointment.starts_at, appointment.ends_at)?;

        self.repository.create(&appointment).await
    }

    async fn find_by_trainer_id(&self, trainer_id: &str) -> AppointmentResult<Vec<Appointment>> {
        ensure_trainer_id(trainer_id)?;

        self.repository.get_by_trainer(trainer_id).await
    }

    async fn find_by_trainer_id_in_range(
        &self,
        trainer_id: &str,
        range: TimeRange,
    ) -> AppointmentResult<Vec<Appointment>> {
        ensure_trainer_id(trainer_id)?;
        // An inverted range is not an error; it simply contains nothing.
        ensure_times_set(range.start, range.end)?;

        self.repository
            .get_by_trainer_in_range(trainer_id, &range)
            .await
    }
}

fn ensure_trainer_id(trainer_id: &str) -> AppointmentResult<()> {
    if trainer_id.trim().is_empty() {
        return Err(AppointmentError::NoTrainerId);
    }

    Ok(())
}

fn ensure_times_set(start: DateTime<Utc>, end: DateTime<Utc>) -> AppointmentResult<()> {
    if is_unset(&start) {
        return Err(AppointmentError::invalid_range("no start time"));
    }

    if is_unset(&end) {
        return Err(AppointmentError::invalid_range("no end time"));
    }

    Ok(())
}
