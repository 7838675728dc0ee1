//! The persisted project document
//!
//! One document per user. Schedules are replaced wholesale on every scheduling
//! or replanning invocation; the progress log is append-only.

use serde::{Deserialize, Serialize};

use chrono::NaiveDate;

use crate::domain::{Availability, Milestone, ProgressEvent, Schedule, Task};
use crate::id::{generate_project_id, now_ms};

/// A user's project: goal, plan blueprint, schedule, and progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,

    pub user_id: String,

    #[serde(default)]
    pub goal: String,

    #[serde(default)]
    pub objective: String,

    #[serde(default)]
    pub deadline: Option<NaiveDate>,

    #[serde(default)]
    pub milestones: Vec<Milestone>,

    /// Replaced wholesale on every (re)scheduling
    #[serde(default)]
    pub schedule: Option<Schedule>,

    /// Append-only progress log
    #[serde(default)]
    pub progress: Vec<ProgressEvent>,

    #[serde(default)]
    pub availability: Availability,

    pub created_at: i64,
    pub updated_at: i64,
}

impl Project {
    /// Create an empty project for a user.
    pub fn new(user_id: impl Into<String>, goal: impl Into<String>) -> Self {
        let now = now_ms();
        Self {
            id: generate_project_id(),
            user_id: user_id.into(),
            goal: goal.into(),
            objective: String::new(),
            deadline: None,
            milestones: Vec::new(),
            schedule: None,
            progress: Vec::new(),
            availability: Availability::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Tasks in milestone-then-task order, paired with their owning milestone
    /// id. This is the order the allocator walks; it is never reordered by
    /// priority or estimate.
    pub fn flattened_tasks(&self) -> impl Iterator<Item = (&str, &Task)> {
        self.milestones
            .iter()
            .flat_map(|m| m.tasks.iter().map(move |t| (m.id.as_str(), t)))
    }

    /// All task identifiers in flattening order.
    pub fn task_ids(&self) -> Vec<String> {
        self.flattened_tasks().map(|(_, t)| t.id.clone()).collect()
    }

    /// Update the timestamp.
    pub fn touch(&mut self) {
        self.updated_at = now_ms();
    }
}
