use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use slotkeeper_api::handlers::appointment::{NotATime, parse_time};
use slotkeeper_core::{
    errors::AppointmentError, mock::MockAppointmentSvc, models::appointment::Appointment,
};

use crate::test_utils::{TRAINER, USER, booking, future_slot, memory_server, mock_server};

fn create_body(start: DateTime<Utc>, end: DateTime<Utc>) -> Value {
    json!({
        "trainer_id": TRAINER,
        "user_id": USER,
        "starts_at": start,
        "ends_at": end,
    })
}

#[tokio::test]
async fn test_create_appointment_returns_no_content() {
    let server = memory_server(vec![]);
    let start = future_slot(9, 0);

    let response = server
        .put("/appointment")
        .json(&create_body(start, start + Duration::minutes(30)))
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(response.text(), "");

    let listed = server.get(&format!("/appointment/trainer/{}", TRAINER)).await;
    let appointments: Vec<Appointment> = listed.json();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].starts_at, start);
    assert!(!appointments[0].id.is_empty());
}

#[tokio::test]
async fn test_create_appointment_keeps_supplied_id() {
    let mut service = MockAppointmentSvc::new();
    service
        .expect_create()
        .withf(|appointment| appointment.id == "apt-42" && appointment.trainer_id == TRAINER)
        .times(1)
        .returning(|_| Ok(()));
    let server = mock_server(service);

    let start = future_slot(9, 0);
    let mut body = create_body(start, start + Duration::minutes(30));
    body["id"] = json!("apt-42");

    let response = server.put("/appointment").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_create_appointment_wrong_length_is_bad_request() {
    let server = memory_server(vec![]);
    let start = future_slot(9, 0);

    let response = server
        .put("/appointment")
        .json(&create_body(start, start + Duration::minutes(45)))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "supplied times are invalid: invalid appointment length (must be 30 minutes)"
    );
}

#[tokio::test]
async fn test_create_appointment_outside_business_hours_is_bad_request() {
    let server = memory_server(vec![]);
    let start = future_slot(17, 30);

    let response = server
        .put("/appointment")
        .json(&create_body(start, start + Duration::minutes(30)))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "proposed time outside business hours");
}

#[tokio::test]
async fn test_create_appointment_conflict_is_conflict() {
    let server = memory_server(vec![booking("existing", 10, 0)]);
    let start = future_slot(10, 0);

    let response = server
        .put("/appointment")
        .json(&create_body(start, start + Duration::minutes(30)))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "time not available");
}

#[tokio::test]
async fn test_create_appointment_taken_id_is_conflict() {
    let server = memory_server(vec![booking("existing", 10, 0)]);
    let start = future_slot(11, 0);
    let mut body = create_body(start, start + Duration::minutes(30));
    body["id"] = json!("existing");

    let response = server.put("/appointment").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "an appointment with the given ID already exists");
}

#[tokio::test]
async fn test_create_appointment_missing_fields_is_bad_request() {
    let mut service = MockAppointmentSvc::new();
    service.expect_create().times(0);
    let server = mock_server(service);

    let start = future_slot(9, 0);
    let response = server
        .put("/appointment")
        .json(&json!({
            "user_id": USER,
            "starts_at": start,
            "ends_at": start + Duration::minutes(30),
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Validation error: trainer is required");
}

#[tokio::test]
async fn test_create_appointment_malformed_body_is_bad_request() {
    let mut service = MockAppointmentSvc::new();
    service.expect_create().times(0);
    let server = mock_server(service);

    let response = server
        .put("/appointment")
        .json(&json!({ "trainer_id": TRAINER, "starts_at": "next tuesday" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Validation error: invalid appointment body");
}

#[tokio::test]
async fn test_create_appointment_database_error_hides_details() {
    let mut service = MockAppointmentSvc::new();
    service
        .expect_create()
        .times(1)
        .returning(|_| Err(AppointmentError::Database(eyre::eyre!("disk I/O error"))));
    let server = mock_server(service);

    let start = future_slot(9, 0);
    let response = server
        .put("/appointment")
        .json(&create_body(start, start + Duration::minutes(30)))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn test_find_appointments_for_trainer_lists_all() {
    let server = memory_server(vec![
        booking("a", 9, 0),
        booking("b", 13, 30),
        Appointment::new(
            "other",
            "trainer-2",
            USER,
            future_slot(9, 0),
            future_slot(9, 30),
        ),
    ]);

    let response = server.get(&format!("/appointment/trainer/{}", TRAINER)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let mut ids: Vec<String> = response
        .json::<Vec<Appointment>>()
        .into_iter()
        .map(|appointment| appointment.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_find_appointments_for_unknown_trainer_is_empty_list() {
    let server = memory_server(vec![booking("a", 9, 0)]);

    let response = server.get("/appointment/trainer/nobody").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_find_appointments_blank_trainer_is_bad_request() {
    let server = memory_server(vec![]);

    let response = server.get("/appointment/trainer/%20").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "no trainer ID supplied");
}

#[tokio::test]
async fn test_find_appointments_in_range_with_rfc3339_bounds() {
    let server = memory_server(vec![
        booking("morning", 9, 0),
        booking("noon", 12, 0),
        booking("late", 16, 0),
    ]);

    let response = server
        .get(&format!("/appointment/trainer/{}", TRAINER))
        .add_query_param("starts_at", future_slot(8, 0).to_rfc3339())
        .add_query_param("ends_at", future_slot(12, 30).to_rfc3339())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let mut ids: Vec<String> = response
        .json::<Vec<Appointment>>()
        .into_iter()
        .map(|appointment| appointment.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["morning".to_string(), "noon".to_string()]);
}

#[tokio::test]
async fn test_find_appointments_in_range_with_unix_bounds() {
    let mut service = MockAppointmentSvc::new();
    service.expect_find_by_trainer_id().times(0);
    service
        .expect_find_by_trainer_id_in_range()
        .withf(|trainer_id, range| {
            trainer_id == TRAINER
                && range.start.timestamp() == 1_900_000_000
                && range.end.timestamp() == 1_900_003_600
        })
        .times(1)
        .returning(|_, _| Ok(vec![]));
    let server = mock_server(service);

    let response = server
        .get(&format!("/appointment/trainer/{}", TRAINER))
        .add_query_param("starts_at", "1900000000")
        .add_query_param("ends_at", "1900003600")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[rstest]
#[case::unix_zero("0")]
#[case::rfc3339_epoch("1970-01-01T00:00:00Z")]
#[tokio::test]
async fn test_find_appointments_from_epoch_lists_everything(#[case] starts_at: &str) {
    let server = memory_server(vec![booking("a", 9, 0), booking("b", 14, 30)]);

    let response = server
        .get(&format!("/appointment/trainer/{}", TRAINER))
        .add_query_param("starts_at", starts_at)
        .add_query_param("ends_at", "4102444800")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Vec<Appointment>>().len(), 2);
}

#[tokio::test]
async fn test_find_appointments_year_one_start_is_unset() {
    let server = memory_server(vec![booking("a", 9, 0)]);

    let response = server
        .get(&format!("/appointment/trainer/{}", TRAINER))
        .add_query_param("starts_at", "0001-01-01T00:00:00Z")
        .add_query_param("ends_at", "4102444800")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "supplied times are invalid: no start time");
}

#[tokio::test]
async fn test_find_appointments_bad_start_time_is_bad_request() {
    let mut service = MockAppointmentSvc::new();
    service.expect_find_by_trainer_id_in_range().times(0);
    let server = mock_server(service);

    let response = server
        .get(&format!("/appointment/trainer/{}", TRAINER))
        .add_query_param("starts_at", "yesterday")
        .add_query_param("ends_at", "1900003600")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Validation error: bad start time - expected an RFC3339 string or Unix timestamp"
    );
}

#[tokio::test]
async fn test_find_appointments_missing_end_time_is_bad_request() {
    let mut service = MockAppointmentSvc::new();
    service.expect_find_by_trainer_id().times(0);
    service.expect_find_by_trainer_id_in_range().times(0);
    let server = mock_server(service);

    let response = server
        .get(&format!("/appointment/trainer/{}", TRAINER))
        .add_query_param("starts_at", "1900000000")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Validation error: bad end time - expected an RFC3339 string or Unix timestamp"
    );
}

#[tokio::test]
async fn test_find_appointments_inverted_range_is_empty() {
    let server = memory_server(vec![booking("a", 9, 0)]);

    let response = server
        .get(&format!("/appointment/trainer/{}", TRAINER))
        .add_query_param("starts_at", future_slot(12, 0).to_rfc3339())
        .add_query_param("ends_at", future_slot(8, 0).to_rfc3339())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[test]
fn test_parse_time_accepts_rfc3339_with_offset() {
    let parsed = parse_time("2030-03-04T09:30:00-08:00").unwrap();

    assert_eq!(parsed.to_rfc3339(), "2030-03-04T17:30:00+00:00");
}

#[test]
fn test_parse_time_accepts_unix_seconds() {
    let parsed = parse_time(" 1900000000 ").unwrap();

    assert_eq!(parsed.timestamp(), 1_900_000_000);
}

#[test]
fn test_parse_time_rejects_garbage() {
    assert_eq!(parse_time(""), Err(NotATime));
    assert_eq!(parse_time("2030-03-04"), Err(NotATime));
    assert_eq!(parse_time("12.5"), Err(NotATime));
}
