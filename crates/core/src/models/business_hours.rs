use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use eyre::{Result, eyre};

/// The window appointments must fit in, read in a single reference location.
///
/// `opens_at` is the first hour an appointment may start in. `closes_at` is the
/// hour by which the last appointment must have ended, so a 17 close admits a
/// 16:30–17:00 slot and rejects 17:00–17:30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    location: Tz,
    opens_at: u32,
    closes_at: u32,
}

impl BusinessHours {
    pub fn new(location: Tz, opens_at: u32, closes_at: u32) -> Result<Self> {
        if opens_at > 23 {
            return Err(eyre!("opening hour must be between 0 and 23, got {}", opens_at));
        }

        if closes_at == 0 || closes_at > 24 {
            return Err(eyre!("closing hour must be between 1 and 24, got {}", closes_at));
        }

        if opens_at >= closes_at {
            return Err(eyre!(
                "opening hour {} must be before closing hour {}",
                opens_at,
                closes_at
            ));
        }

        Ok(Self {
            location,
            opens_at,
            closes_at,
        })
    }

    pub fn location(&self) -> Tz {
        self.location
    }

    pub fn opens_at(&self) -> u32 {
        self.opens_at
    }

    pub fn closes_at(&self) -> u32 {
        self.closes_at
    }

    /// Whether `[start, end)` lies inside business hours on the local day the
    /// appointment starts.
    pub fn admits(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let local_start = start.with_timezone(&self.location);
        if local_start.hour() < self.opens_at {
            return false;
        }

        let Some(midnight) = local_start.date_naive().and_hms_opt(0, 0, 0) else {
            return false;
        };
        let local_end = end.with_timezone(&self.location).naive_local();
        let minutes_into_day = (local_end - midnight).num_minutes();

        minutes_into_day <= i64::from(self.closes_at) * 60
    }
}
