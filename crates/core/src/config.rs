//! # Scheduling Policy
//!
//! The single, process-wide set of booking rules: how long an appointment
//! lasts and the business hours it must fit in. The policy is built once at
//! start-up and handed to the service; nothing mutates it afterwards.
//!
//! ## Environment Variables
//!
//! - `APPOINTMENT_LENGTH_MINUTES`: fixed appointment length (default: 30)
//! - `BUSINESS_HOURS_OPEN`: first hour an appointment may start in (default: 8)
//! - `BUSINESS_HOURS_CLOSE`: hour by which appointments must end (default: 17)
//! - `BUSINESS_HOURS_TIMEZONE`: IANA name of the reference location
//!   (default: "America/Los_Angeles")

use chrono::Duration;
use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use std::env;

use crate::models::business_hours::BusinessHours;

pub const DEFAULT_APPOINTMENT_MINUTES: i64 = 30;
pub const DEFAULT_OPENING_HOUR: u32 = 8;
pub const DEFAULT_CLOSING_HOUR: u32 = 17;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;

/// Booking rules shared by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePolicy {
    /// Every appointment lasts exactly this long
    pub appointment_length: Duration,

    /// Window appointments must fall inside
    pub business_hours: BusinessHours,
}

impl SchedulePolicy {
    pub fn new(appointment_length: Duration, business_hours: BusinessHours) -> Result<Self> {
        if appointment_length <= Duration::zero() {
            return Err(eyre!("appointment length must be positive"));
        }

        Ok(Self {
            appointment_length,
            business_hours,
        })
    }

    /// Loads the policy from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the policy from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Fails when a value is present but cannot be parsed, when the timezone
    /// is unknown, or when the hours do not form a valid window.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let minutes = match lookup("APPOINTMENT_LENGTH_MINUTES") {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .wrap_err("Invalid APPOINTMENT_LENGTH_MINUTES value")?,
            None => DEFAULT_APPOINTMENT_MINUTES,
        };

        let opens_at = match lookup("BUSINESS_HOURS_OPEN") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .wrap_err("Invalid BUSINESS_HOURS_OPEN value")?,
            None => DEFAULT_OPENING_HOUR,
        };

        let closes_at = match lookup("BUSINESS_HOURS_CLOSE") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .wrap_err("Invalid BUSINESS_HOURS_CLOSE value")?,
            None => DEFAULT_CLOSING_HOUR,
        };

        let location = match lookup("BUSINESS_HOURS_TIMEZONE") {
            Some(value) => value
                .trim()
                .parse::<Tz>()
                .map_err(|e| eyre!("Invalid BUSINESS_HOURS_TIMEZONE {:?}: {}", value, e))?,
            None => DEFAULT_TIMEZONE,
        };

        let length = Duration::try_minutes(minutes)
            .ok_or_else(|| eyre!("APPOINTMENT_LENGTH_MINUTES out of range: {}", minutes))?;

        Self::new(length, BusinessHours::new(location, opens_at, closes_at)?)
    }
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            appointment_length: Duration::minutes(DEFAULT_APPOINTMENT_MINUTES),
            business_hours: BusinessHours::new(
                DEFAULT_TIMEZONE,
                DEFAULT_OPENING_HOUR,
                DEFAULT_CLOSING_HOUR,
            )
            .expect("default business hours form a valid window"),
        }
    }
}
