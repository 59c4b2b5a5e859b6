//! # Error Handling Middleware
//!
//! Maps appointment errors to HTTP status codes and JSON error bodies so every
//! handler reports failures the same way. Infrastructure failures are logged
//! here and answered with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use slotkeeper_core::errors::AppointmentError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotkeeper_api::middleware::error_handling::AppError;
/// use slotkeeper_core::errors::AppointmentError;
///
/// async fn handler(trainer_id: String) -> Result<Json<Vec<String>>, AppError> {
///     if trainer_id.trim().is_empty() {
///         return Err(AppError(AppointmentError::NoTrainerId));
///     }
///     Ok(Json(vec![]))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub AppointmentError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppointmentError::InvalidDateRange(_)
            | AppointmentError::OutsideBusinessHours
            | AppointmentError::NoTrainerId
            | AppointmentError::Validation(_) => StatusCode::BAD_REQUEST,
            AppointmentError::ScheduleConflict | AppointmentError::IdTaken => {
                StatusCode::CONFLICT
            }
            AppointmentError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts application errors to HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self.0 {
            AppointmentError::Database(report) => {
                error!(error = ?report, "Service encountered error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Lets handlers use `?` on `AppointmentResult` values
impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        AppError(err)
    }
}

/// Treats a bare `eyre::Report` as an infrastructure failure
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(AppointmentError::Database(err))
    }
}
