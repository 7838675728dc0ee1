//! Tasks and milestones
//!
//! A Milestone groups an ordered sequence of Tasks. Tasks are immutable once
//! decomposed, except for the guidance record an external collaborator may
//! attach later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hour estimate used when a task carries no usable estimate.
pub const DEFAULT_ESTIMATE_HOURS: f64 = 1.0;

/// An atomic unit of work with an hour estimate, priority, and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the plan
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Estimate in hours; absent or non-positive values fall back to
    /// [`DEFAULT_ESTIMATE_HOURS`] at allocation time
    #[serde(default)]
    pub estimate_hours: Option<f64>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Guidance attached later by an external collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<Guidance>,
}

impl Task {
    /// Create a task with just an id, title, and estimate.
    pub fn new(id: impl Into<String>, title: impl Into<String>, estimate_hours: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            estimate_hours: Some(estimate_hours),
            priority: Priority::default(),
            tags: Vec::new(),
            guidance: None,
        }
    }

    /// The estimate the allocator actually uses.
    ///
    /// Missing, zero, or negative estimates default to one hour; malformed
    /// input is handled by defaulting, never by failing.
    pub fn effective_estimate(&self) -> f64 {
        match self.estimate_hours {
            Some(h) if h > 0.0 => h,
            _ => DEFAULT_ESTIMATE_HOURS,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Free-text guidance generated for a single task by an external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guidance {
    #[serde(default)]
    pub context: String,

    #[serde(default)]
    pub action_plan: Vec<String>,

    /// A prompt the user can paste into an external LLM for deep-dive help
    #[serde(default)]
    pub ai_prompt: String,

    pub generated_at: DateTime<Utc>,
}

/// A named deliverable grouping an ordered set of Tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub acceptance_criteria: Vec<String>,

    /// Identifiers of milestones this one declares a dependency on.
    /// Declared only; the allocator schedules in raw milestone order.
    #[serde(default)]
    pub depends_on: Vec<String>,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Milestone {
    /// Create a milestone with an id, title, and tasks.
    pub fn new(id: impl Into<String>, title: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            acceptance_criteria: Vec::new(),
            depends_on: Vec::new(),
            tasks,
        }
    }
}
