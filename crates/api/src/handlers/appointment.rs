use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use slotkeeper_core::{
    errors::AppointmentError,
    models::{
        appointment::{Appointment, AppointmentRequest},
        time_range::TimeRange,
    },
    service::AppointmentService,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::{ApiState, middleware::error_handling::AppError};

pub const QUERY_PARAMETER_START: &str = "starts_at";
pub const QUERY_PARAMETER_END: &str = "ends_at";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected an RFC3339 string or Unix timestamp")]
pub struct NotATime;

/// Optional bounds on a trainer's schedule listing.
#[derive(Debug, Default, Deserialize)]
pub struct TrainerAppointmentsQuery {
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
}

impl TrainerAppointmentsQuery {
    fn is_ranged(&self) -> bool {
        self.starts_at.is_some() || self.ends_at.is_some()
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<AppointmentRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(%rejection, "Rejected appointment body");
        AppointmentError::Validation("invalid appointment body".to_string())
    })?;

    let appointment = payload.into_appointment()?;
    state.service.create(appointment).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn find_appointments_for_trainer(
    State(state): State<Arc<ApiState>>,
    Path(trainer_id): Path<String>,
    Query(query): Query<TrainerAppointmentsQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = if query.is_ranged() {
        let start = parse_time(query.starts_at.as_deref().unwrap_or_default()).map_err(|e| {
            AppointmentError::Validation(format!("bad start time - {}", e))
        })?;
        let end = parse_time(query.ends_at.as_deref().unwrap_or_default())
            .map_err(|e| AppointmentError::Validation(format!("bad end time - {}", e)))?;

        state
            .service
            .find_by_trainer_id_in_range(&trainer_id, TimeRange::new(start, end))
            .await?
    } else {
        state.service.find_by_trainer_id(&trainer_id).await?
    };

    Ok(Json(appointments))
}

/// Parses an RFC 3339 timestamp, falling back to integer Unix seconds.
pub fn parse_time(value: &str) -> Result<DateTime<Utc>, NotATime> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    value
        .parse::<i64>()
        .ok()
        .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
        .ok_or(NotATime)
}
