use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("supplied times are invalid: {0}")]
    InvalidDateRange(String),

    #[error("proposed time outside business hours")]
    OutsideBusinessHours,

    #[error("time not available")]
    ScheduleConflict,

    #[error("an appointment with the given ID already exists")]
    IdTaken,

    #[error("no trainer ID supplied")]
    NoTrainerId,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

impl AppointmentError {
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        AppointmentError::InvalidDateRange(reason.into())
    }

    /// True for the kinds a caller caused and can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AppointmentError::Database(_))
    }
}

pub type AppointmentResult<T> = Result<T, AppointmentError>;
