//! Schedules
//!
//! The complete date assignment for every task in a plan, in the wire shape
//! both the allocator and the plan generator produce.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single task pinned to a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub task_id: String,

    /// ISO calendar date, no time component
    pub date: NaiveDate,

    /// Estimate carried over from the task at assignment time
    pub estimate_hours: f64,
}

/// The full ordered-by-date collection of scheduled tasks for a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub scheduled_tasks: Vec<ScheduledTask>,

    /// Date of the last scheduled task (start date for an empty plan)
    pub predicted_completion: NaiveDate,

    #[serde(default)]
    pub deadline_violation: bool,

    #[serde(default)]
    pub rationale: String,

    /// Generator confidence in [0, 1]
    #[serde(default)]
    pub confidence: f64,
}

impl Schedule {
    /// An empty schedule completing on the given date.
    pub fn empty(completion: NaiveDate) -> Self {
        Self {
            scheduled_tasks: Vec::new(),
            predicted_completion: completion,
            deadline_violation: false,
            rationale: String::new(),
            confidence: 0.0,
        }
    }

    /// Scheduled tasks sorted by date (stable, so same-day order is kept).
    pub fn by_date(&self) -> Vec<&ScheduledTask> {
        let mut sorted: Vec<&ScheduledTask> = self.scheduled_tasks.iter().collect();
        sorted.sort_by_key(|st| st.date);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_wire_shape_field_names() {
        let schedule = Schedule {
            scheduled_tasks: vec![ScheduledTask {
                task_id: "T1".to_string(),
                date: date("2025-01-06"),
                estimate_hours: 2.0,
            }],
            predicted_completion: date("2025-01-06"),
            deadline_violation: false,
            rationale: "fits in one day".to_string(),
            confidence: 0.9,
        };

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["scheduled_tasks"][0]["task_id"], "T1");
        assert_eq!(json["scheduled_tasks"][0]["date"], "2025-01-06");
        assert_eq!(json["scheduled_tasks"][0]["estimate_hours"], 2.0);
        assert_eq!(json["predicted_completion"], "2025-01-06");
        assert_eq!(json["deadline_violation"], false);
        assert_eq!(json["confidence"], 0.9);
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let schedule: Schedule = serde_json::from_str(
            r#"{"scheduled_tasks":[],"predicted_completion":"2025-03-01"}"#,
        )
        .unwrap();
        assert!(!schedule.deadline_violation);
        assert!(schedule.rationale.is_empty());
        assert_eq!(schedule.confidence, 0.0);
    }

    #[test]
    fn test_by_date_sorts_stably() {
        let schedule = Schedule {
            scheduled_tasks: vec![
                ScheduledTask {
                    task_id: "T2".to_string(),
                    date: date("2025-01-08"),
                    estimate_hours: 1.0,
                },
                ScheduledTask {
                    task_id: "T1".to_string(),
                    date: date("2025-01-06"),
                    estimate_hours: 1.0,
                },
                ScheduledTask {
                    task_id: "T3".to_string(),
                    date: date("2025-01-06"),
                    estimate_hours: 1.0,
                },
            ],
            predicted_completion: date("2025-01-08"),
            deadline_violation: false,
            rationale: String::new(),
            confidence: 0.0,
        };

        let sorted = schedule.by_date();
        let ids: Vec<&str> = sorted.iter().map(|st| st.task_id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T3", "T2"]);
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::empty(date("2025-01-06"));
        assert!(schedule.scheduled_tasks.is_empty());
        assert_eq!(schedule.predicted_completion, date("2025-01-06"));
    }

    #[test]
    fn test_iso_date_ordering_matches_lexicographic() {
        // NaiveDate ordering must agree with string ordering of zero-padded
        // ISO dates, which is what the deadline comparison relies on.
        let a = date("2025-01-09");
        let b = date("2025-01-10");
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }
}
