use axum::{http::StatusCode, response::IntoResponse};
use pretty_assertions::assert_eq;
use rstest::rstest;
use slotkeeper_api::middleware::error_handling::AppError;
use slotkeeper_core::errors::AppointmentError;

#[rstest]
#[case(AppointmentError::invalid_range("no start time"), StatusCode::BAD_REQUEST)]
#[case(AppointmentError::OutsideBusinessHours, StatusCode::BAD_REQUEST)]
#[case(AppointmentError::NoTrainerId, StatusCode::BAD_REQUEST)]
#[case(AppointmentError::Validation("user is required".into()), StatusCode::BAD_REQUEST)]
#[case(AppointmentError::ScheduleConflict, StatusCode::CONFLICT)]
#[case(AppointmentError::IdTaken, StatusCode::CONFLICT)]
#[case(
    AppointmentError::Database(eyre::eyre!("database is locked")),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: AppointmentError, #[case] expected: StatusCode) {
    let error = AppError(error);

    assert_eq!(error.status(), expected);
    assert_eq!(error.into_response().status(), expected);
}

#[test]
fn test_eyre_report_maps_to_internal_error() {
    let error: AppError = eyre::eyre!("connection refused").into();

    assert!(matches!(error.0, AppointmentError::Database(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
