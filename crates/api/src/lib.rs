//! # Slotkeeper API
//!
//! The API crate provides the web server for booking trainer appointments.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into service calls
//! - **Middleware**: Error to status code mapping
//! - **Config**: Handle environment and application configuration
//!
//! Handlers only see the [`AppointmentService`] trait; the server wires it to a
//! [`SchedulingService`] over the SQLite repository.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use eyre::{Result, WrapErr};
use slotkeeper_core::service::{AppointmentService, SchedulingService};
use slotkeeper_db::{DbPool, repositories::appointment::SqlAppointmentRepository};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let service = SchedulingService::new(repository, SchedulePolicy::default());
/// let state = Arc::new(ApiState::new(Arc::new(service)));
/// let app = slotkeeper_api::build_router(state);
/// ```
pub struct ApiState {
    /// Booking operations used by the handlers
    pub service: Arc<dyn AppointmentService>,
}

impl ApiState {
    pub fn new(service: Arc<dyn AppointmentService>) -> Self {
        Self { service }
    }
}

/// Builds the router with every endpoint and request tracing, without the
/// deployment layers (CORS, timeout) added by [`start_server`].
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Appointment endpoints
        .merge(routes::appointment::routes())
        .layer(TraceLayer::new_for_http())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// Sets up logging, wires the scheduling service to the SQLite repository,
/// configures routes and serves until Ctrl-C.
///
/// # Arguments
///
/// * `config` - API configuration including host, port and scheduling policy
/// * `db_pool` - SQLite connection pool with the schema already initialized
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let repository = SqlAppointmentRepository::new(db_pool, config.table.clone())?;
    let service = SchedulingService::new(Arc::new(repository), config.policy);
    let state = Arc::new(ApiState::new(Arc::new(service)));

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<axum::http::HeaderValue>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::PUT,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down server");
}
