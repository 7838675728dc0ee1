//! Progress events
//!
//! An append-only log of what the user did. Events are never mutated; undoing
//! a completion filters out the most recent "done" entry for the task.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status recorded by a progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStatus {
    Done,
    Skipped,
    InProgress,
}

/// A single progress record for a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub task_id: String,

    /// Date the event was recorded
    pub date: NaiveDate,

    pub status: ProgressStatus,

    /// Completion fraction in [0, 1]
    pub percent_complete: f64,

    #[serde(default)]
    pub notes: String,
}

impl ProgressEvent {
    /// A "done" event for the task on the given date.
    pub fn done(task_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            task_id: task_id.into(),
            date,
            status: ProgressStatus::Done,
            percent_complete: 1.0,
            notes: String::new(),
        }
    }

    /// A "skipped" event for the task on the given date.
    pub fn skipped(task_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            task_id: task_id.into(),
            date,
            status: ProgressStatus::Skipped,
            percent_complete: 0.0,
            notes: String::new(),
        }
    }
}

/// True if any event marks the task done, regardless of how many events exist
/// for it.
pub fn is_done(events: &[ProgressEvent], task_id: &str) -> bool {
    events
        .iter()
        .any(|e| e.task_id == task_id && e.status == ProgressStatus::Done)
}

/// Remove the most recent "done" event for the task, leaving everything else
/// untouched. Returns true if an event was removed.
pub fn undo_completion(events: &mut Vec<ProgressEvent>, task_id: &str) -> bool {
    let last_done = events
        .iter()
        .rposition(|e| e.task_id == task_id && e.status == ProgressStatus::Done);

    match last_done {
        Some(index) => {
            events.remove(index);
            true
        }
        None => false,
    }
}
