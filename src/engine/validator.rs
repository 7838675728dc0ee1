//! Plan validator
//!
//! Inspects a candidate schedule against a deadline and reports structural
//! violations as ordered, structured records. Pure and total: never fails,
//! always returns a (possibly empty) list.
//!
//! Task coverage is assumed from generator good faith; the validator flags
//! duplicated identifiers but does not look for missing ones.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Schedule;

/// A structural violation found in a candidate schedule.
///
/// The `Display` rendering is the corrective directive fed back to the plan
/// generator on the next repair attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Predicted completion falls after the deadline
    DeadlineMissed {
        predicted: NaiveDate,
        deadline: NaiveDate,
    },

    /// One or more task identifiers appear more than once
    DuplicateTasks { task_ids: Vec<String> },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DeadlineMissed { predicted, deadline } => write!(
                f,
                "Deadline violation: predicted completion {} is after deadline {}. \
                 Compress the schedule to meet the deadline.",
                predicted, deadline
            ),
            Violation::DuplicateTasks { task_ids } => write!(
                f,
                "Duplicate tasks detected: {}. Ensure each task appears exactly once.",
                task_ids.join(", ")
            ),
        }
    }
}

/// Check a candidate schedule, in priority order: deadline first, then
/// duplicate assignments. An empty result means the schedule is valid.
pub fn validate(schedule: &Schedule, deadline: Option<NaiveDate>) -> Vec<Violation> {
    let mut violations = Vec::new();

    if let Some(deadline) = deadline {
        if schedule.predicted_completion > deadline {
            violations.push(Violation::DeadlineMissed {
                predicted: schedule.predicted_completion,
                deadline,
            });
        }
    }

    // Count assignments per task id, keeping first-occurrence order so the
    // directive is stable across runs.
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for st in &schedule.scheduled_tasks {
        match counts.iter_mut().find(|(id, _)| *id == st.task_id) {
            Some((_, count)) => *count += 1,
            None => counts.push((&st.task_id, 1)),
        }
    }

    let duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id.to_string())
        .collect();

    if !duplicates.is_empty() {
        violations.push(Violation::DuplicateTasks {
            task_ids: duplicates,
        });
    }

    violations
}
