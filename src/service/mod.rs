//! Plan service
//!
//! Ties the store, the scheduling engine, and the plan generator together
//! behind the operations the CLI exposes. Every entry point takes an injected
//! "today" so behavior never depends on ambient wall-clock reads.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    progress, Availability, Milestone, ProgressEvent, ProgressStatus, Project, Schedule,
};
use crate::engine::{allocate, detect_stall, StallUrgency};
use crate::error::{PlannrError, Result};
use crate::planner::{
    PlanGenerator, PlanRequest, RepairLoop, RepairOutcome, ReplanRequest, ScheduleRequest,
};
use crate::storage::ProjectStore;

/// A project document augmented with the stall query result.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStatus {
    #[serde(flatten)]
    pub project: Project,

    /// Earliest due task with no "done" event, if any
    pub stalled_task_id: Option<String>,

    pub stall_urgency: Option<StallUrgency>,
}

/// Application service for project planning operations.
pub struct PlanService {
    store: Arc<dyn ProjectStore>,
    generator: Option<Arc<dyn PlanGenerator>>,
}

impl PlanService {
    /// A service with only the deterministic scheduling path available.
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self {
            store,
            generator: None,
        }
    }

    /// A service with both scheduling paths available.
    pub fn with_generator(store: Arc<dyn ProjectStore>, generator: Arc<dyn PlanGenerator>) -> Self {
        Self {
            store,
            generator: Some(generator),
        }
    }

    /// Create (or replace) a user's project from a decomposed blueprint.
    pub fn create_project(
        &self,
        user_id: &str,
        goal: &str,
        deadline: Option<NaiveDate>,
        milestones: Vec<Milestone>,
        availability: Availability,
    ) -> Result<Project> {
        let mut project = Project::new(user_id, goal);
        project.deadline = deadline;
        project.milestones = milestones;
        project.availability = availability;
        self.store.save(&project)?;
        log::info!("created project {} for {}", project.id, user_id);
        Ok(project)
    }

    fn load_required(&self, user_id: &str) -> Result<Project> {
        self.store
            .load(user_id)?
            .ok_or_else(|| PlannrError::ProjectNotFound(user_id.to_string()))
    }

    /// Deterministic path: build the schedule with the greedy allocator and
    /// replace the stored one.
    pub fn schedule(&self, user_id: &str, today: NaiveDate) -> Result<Schedule> {
        let mut project = self.load_required(user_id)?;

        let tasks: Vec<_> = project.flattened_tasks().map(|(_, t)| t).collect();
        let schedule = allocate(
            tasks.iter().copied(),
            &project.availability,
            today,
            project.deadline,
        );

        project.schedule = Some(schedule.clone());
        project.touch();
        self.store.save(&project)?;
        Ok(schedule)
    }

    /// Generative path: run the repair loop around the configured generator
    /// and replace the stored schedule with the best candidate.
    ///
    /// The outcome carries the attempt count and any outstanding violations
    /// so the caller can surface a warning; an imperfect schedule is still
    /// persisted rather than dropped.
    pub async fn schedule_generative(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<RepairOutcome> {
        let mut project = self.load_required(user_id)?;

        let request = PlanRequest::Schedule(ScheduleRequest {
            today,
            milestones: project.milestones.clone(),
            deadline: project.deadline,
            availability: project.availability.clone(),
        });

        let outcome = self.repair_loop()?.run(&request).await?;
        project.schedule = Some(outcome.schedule.clone());
        project.touch();
        self.store.save(&project)?;
        Ok(outcome)
    }

    /// Revise the stored schedule against recorded progress and an optional
    /// user instruction, through the same repair loop.
    pub async fn replan(
        &self,
        user_id: &str,
        instruction: &str,
        today: NaiveDate,
    ) -> Result<RepairOutcome> {
        let mut project = self.load_required(user_id)?;
        let current_plan = project.schedule.clone().ok_or_else(|| {
            PlannrError::InvalidState("no schedule to replan; run schedule first".to_string())
        })?;

        let request = PlanRequest::Replan(ReplanRequest {
            today,
            current_plan,
            progress: project.progress.clone(),
            availability: project.availability.clone(),
            deadline: project.deadline,
            instruction: instruction.to_string(),
        });

        let outcome = self.repair_loop()?.run(&request).await?;
        project.schedule = Some(outcome.schedule.clone());
        project.touch();
        self.store.save(&project)?;
        Ok(outcome)
    }

    fn repair_loop(&self) -> Result<RepairLoop> {
        let generator = self.generator.clone().ok_or_else(|| {
            PlannrError::InvalidState("no plan generator configured".to_string())
        })?;
        Ok(RepairLoop::new(generator))
    }

    /// Append a progress event for a task.
    pub fn record_progress(
        &self,
        user_id: &str,
        task_id: &str,
        status: ProgressStatus,
        today: NaiveDate,
    ) -> Result<()> {
        let mut project = self.load_required(user_id)?;

        if !project.flattened_tasks().any(|(_, t)| t.id == task_id) {
            return Err(PlannrError::TaskNotFound(task_id.to_string()));
        }

        let event = match status {
            ProgressStatus::Done => ProgressEvent::done(task_id, today),
            ProgressStatus::Skipped => ProgressEvent::skipped(task_id, today),
            ProgressStatus::InProgress => ProgressEvent {
                task_id: task_id.to_string(),
                date: today,
                status: ProgressStatus::InProgress,
                percent_complete: 0.0,
                notes: String::new(),
            },
        };

        project.progress.push(event);
        project.touch();
        self.store.save(&project)
    }

    /// Remove the most recent "done" event for a task. Returns false when
    /// there was nothing to undo.
    pub fn undo_completion(&self, user_id: &str, task_id: &str) -> Result<bool> {
        let mut project = self.load_required(user_id)?;
        let removed = progress::undo_completion(&mut project.progress, task_id);
        if removed {
            project.touch();
            self.store.save(&project)?;
        }
        Ok(removed)
    }

    /// The stall query: the project document augmented with the earliest
    /// unfinished due task, if any.
    pub fn status(&self, user_id: &str, today: NaiveDate) -> Result<ProjectStatus> {
        let project = self.load_required(user_id)?;

        let stall = project
            .schedule
            .as_ref()
            .and_then(|s| detect_stall(s, &project.progress, today));

        Ok(ProjectStatus {
            stalled_task_id: stall.as_ref().map(|s| s.task_id.clone()),
            stall_urgency: stall.map(|s| s.urgency),
            project,
        })
    }
}
