pub mod appointment;
pub mod business_hours;
pub mod time_range;
