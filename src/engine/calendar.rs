//! Calendar model
//!
//! Answers "is this date a working day" and "how many hours fit in a day"
//! from an availability configuration. No side effects, no failure modes.

use chrono::{Datelike, NaiveDate};

use crate::domain::Availability;

/// True iff the date's weekday is in the availability's active set.
pub fn is_workday(availability: &Availability, date: NaiveDate) -> bool {
    availability.active_weekdays().contains(&date.weekday())
}

/// Effective schedulable hours per day:
/// `hours_per_day * max_daily_utilization`.
pub fn daily_capacity(availability: &Availability) -> f64 {
    availability.effective_hours_per_day() * availability.effective_utilization()
}
