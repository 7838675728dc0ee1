//! Requests to the plan generator
//!
//! Two request kinds share the generator interface: initial scheduling from a
//! milestone blueprint, and replanning an existing schedule against recorded
//! progress and an optional user instruction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Availability, Milestone, ProgressEvent, Schedule};

/// Inputs for scheduling a milestone blueprint from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub today: NaiveDate,
    pub milestones: Vec<Milestone>,
    pub deadline: Option<NaiveDate>,
    pub availability: Availability,
}

/// Inputs for revising an existing schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplanRequest {
    pub today: NaiveDate,
    pub current_plan: Schedule,
    pub progress: Vec<ProgressEvent>,
    pub availability: Availability,
    pub deadline: Option<NaiveDate>,

    /// Optional free-text user instruction ("I lost next week, reschedule")
    #[serde(default)]
    pub instruction: String,
}

/// A request to the plan generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanRequest {
    Schedule(ScheduleRequest),
    Replan(ReplanRequest),
}

impl PlanRequest {
    /// The injected "current date" this request was made against.
    pub fn today(&self) -> NaiveDate {
        match self {
            PlanRequest::Schedule(r) => r.today,
            PlanRequest::Replan(r) => r.today,
        }
    }

    /// The deadline candidate schedules are validated against.
    pub fn deadline(&self) -> Option<NaiveDate> {
        match self {
            PlanRequest::Schedule(r) => r.deadline,
            PlanRequest::Replan(r) => r.deadline,
        }
    }

    pub fn availability(&self) -> &Availability {
        match self {
            PlanRequest::Schedule(r) => &r.availability,
            PlanRequest::Replan(r) => &r.availability,
        }
    }
}
