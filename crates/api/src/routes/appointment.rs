use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/appointment",
            put(handlers::appointment::create_appointment),
        )
        .route(
            "/appointment/trainer/:trainer_id",
            get(handlers::appointment::find_appointments_for_trainer),
        )
}
