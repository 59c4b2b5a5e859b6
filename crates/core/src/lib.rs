//! # Slotkeeper Core
//!
//! Domain types and booking rules for trainer appointments. The crate defines
//! the [`repository::AppointmentRepository`] and [`service::AppointmentService`]
//! seams; storage lives in `slotkeeper-db` and HTTP in `slotkeeper-api`.

/// Scheduling policy loaded at start-up
pub mod config;
/// Domain error kinds
pub mod errors;
/// In-process repository
pub mod memory;
/// mockall doubles for both seams
pub mod mock;
/// Appointment, time range and business hours values
pub mod models;
/// Persistence seam
pub mod repository;
/// Validation in front of the repository
pub mod service;
