//! User availability
//!
//! Which weekdays the user works and how many hours a day they can commit.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Default working hours per day when unspecified.
pub const DEFAULT_HOURS_PER_DAY: f64 = 4.0;

/// Default fraction of hours-per-day actually schedulable.
pub const DEFAULT_MAX_DAILY_UTILIZATION: f64 = 0.8;

/// A user's weekly availability.
///
/// `workdays` holds weekday names as the wire carries them ("Mon", "Tue", ...).
/// Malformed names are excluded when resolving the active set; an empty
/// effective set falls back to Monday-Friday so the calendar always has at
/// least one working day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Availability {
    pub workdays: Vec<String>,

    pub hours_per_day: f64,

    /// Fraction in (0, 1] applied on top of hours_per_day
    pub max_daily_utilization: f64,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            workdays: default_workdays(),
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            max_daily_utilization: DEFAULT_MAX_DAILY_UTILIZATION,
        }
    }
}

fn default_workdays() -> Vec<String> {
    ["Mon", "Tue", "Wed", "Thu", "Fri"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

impl Availability {
    /// Create an availability from weekday names and hours per day.
    pub fn new(workdays: &[&str], hours_per_day: f64, max_daily_utilization: f64) -> Self {
        Self {
            workdays: workdays.iter().map(|d| d.to_string()).collect(),
            hours_per_day,
            max_daily_utilization,
        }
    }

    /// Resolve the active weekday set.
    ///
    /// Weekday names parse case-insensitively in both abbreviated and full
    /// forms; anything unparseable is skipped. An empty result falls back to
    /// Monday-Friday.
    pub fn active_weekdays(&self) -> HashSet<Weekday> {
        let parsed: HashSet<Weekday> = self
            .workdays
            .iter()
            .filter_map(|name| Weekday::from_str(name).ok())
            .collect();

        if parsed.is_empty() {
            [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ]
            .into_iter()
            .collect()
        } else {
            parsed
        }
    }

    /// Hours per day with malformed values replaced by the default.
    pub fn effective_hours_per_day(&self) -> f64 {
        if self.hours_per_day > 0.0 {
            self.hours_per_day
        } else {
            DEFAULT_HOURS_PER_DAY
        }
    }

    /// Utilization fraction with out-of-range values replaced by the default.
    pub fn effective_utilization(&self) -> f64 {
        if self.max_daily_utilization > 0.0 && self.max_daily_utilization <= 1.0 {
            self.max_daily_utilization
        } else {
            DEFAULT_MAX_DAILY_UTILIZATION
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workdays_are_weekdays() {
        let availability = Availability::default();
        let active = availability.active_weekdays();
        assert_eq!(active.len(), 5);
        assert!(active.contains(&Weekday::Mon));
        assert!(active.contains(&Weekday::Fri));
        assert!(!active.contains(&Weekday::Sat));
        assert!(!active.contains(&Weekday::Sun));
    }

    #[test]
    fn test_malformed_weekday_names_excluded() {
        let availability = Availability::new(&["Mon", "Funday", "Wed"], 4.0, 0.8);
        let active = availability.active_weekdays();
        assert_eq!(active.len(), 2);
        assert!(active.contains(&Weekday::Mon));
        assert!(active.contains(&Weekday::Wed));
    }

    #[test]
    fn test_all_malformed_falls_back_to_weekdays() {
        let availability = Availability::new(&["Funday", "Blursday"], 4.0, 0.8);
        let active = availability.active_weekdays();
        assert_eq!(active.len(), 5);
        assert!(active.contains(&Weekday::Tue));
    }

    #[test]
    fn test_empty_workdays_fall_back_to_weekdays() {
        let availability = Availability::new(&[], 4.0, 0.8);
        assert_eq!(availability.active_weekdays().len(), 5);
    }

    #[test]
    fn test_full_names_and_case_accepted() {
        let availability = Availability::new(&["monday", "TUESDAY", "sat"], 4.0, 0.8);
        let active = availability.active_weekdays();
        assert!(active.contains(&Weekday::Mon));
        assert!(active.contains(&Weekday::Tue));
        assert!(active.contains(&Weekday::Sat));
    }

    #[test]
    fn test_effective_hours_per_day_defaults() {
        let mut availability = Availability::default();
        availability.hours_per_day = 0.0;
        assert_eq!(availability.effective_hours_per_day(), DEFAULT_HOURS_PER_DAY);

        availability.hours_per_day = -2.0;
        assert_eq!(availability.effective_hours_per_day(), DEFAULT_HOURS_PER_DAY);

        availability.hours_per_day = 6.0;
        assert_eq!(availability.effective_hours_per_day(), 6.0);
    }

    #[test]
    fn test_effective_utilization_defaults() {
        let mut availability = Availability::default();
        availability.max_daily_utilization = 0.0;
        assert_eq!(
            availability.effective_utilization(),
            DEFAULT_MAX_DAILY_UTILIZATION
        );

        availability.max_daily_utilization = 1.5;
        assert_eq!(
            availability.effective_utilization(),
            DEFAULT_MAX_DAILY_UTILIZATION
        );

        availability.max_daily_utilization = 1.0;
        assert_eq!(availability.effective_utilization(), 1.0);
    }

    #[test]
    fn test_deserializes_with_missing_fields() {
        let availability: Availability = serde_json::from_str(r#"{"workdays":["Mon"]}"#).unwrap();
        assert_eq!(availability.hours_per_day, DEFAULT_HOURS_PER_DAY);
        assert_eq!(
            availability.max_daily_utilization,
            DEFAULT_MAX_DAILY_UTILIZATION
        );
        assert_eq!(availability.active_weekdays().len(), 1);
    }
}
