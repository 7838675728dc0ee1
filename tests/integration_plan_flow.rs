//! Full planning flow integration tests
//!
//! Exercises project creation, both scheduling paths, progress recording, and
//! the stall query against a real file store and a scripted stub generator.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tempfile::TempDir;

use plannr::domain::{Availability, Milestone, ProgressStatus, Schedule, ScheduledTask, Task};
use plannr::engine::{StallUrgency, Violation};
use plannr::planner::{GeneratorError, PlanGenerator, PlanRequest};
use plannr::service::PlanService;
use plannr::storage::{JsonProjectStore, ProjectStore};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn blueprint() -> Vec<Milestone> {
    vec![
        Milestone::new(
            "M1",
            "Foundation",
            vec![
                Task::new("T1", "Set up repo", 2.0),
                Task::new("T2", "Continuous integration", 2.0),
            ],
        ),
        Milestone::new("M2", "Core", vec![Task::new("T3", "Lexer", 1.0)]),
    ]
}

fn availability() -> Availability {
    Availability::new(&["Mon", "Tue", "Wed", "Thu", "Fri"], 4.0, 0.8)
}

/// Stub generator replaying a fixed script of candidates.
struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<Schedule, GeneratorError>>>,
}

impl ScriptedGenerator {
    fn new(script: Vec<Result<Schedule, GeneratorError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
        })
    }
}

#[async_trait]
impl PlanGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _request: &PlanRequest,
        _feedback: &[Violation],
    ) -> Result<Schedule, GeneratorError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GeneratorError::MalformedResponse("script exhausted".into())))
    }
}

fn candidate(dates: &[(&str, &str)], completion: &str) -> Schedule {
    Schedule {
        scheduled_tasks: dates
            .iter()
            .map(|(id, d)| ScheduledTask {
                task_id: id.to_string(),
                date: date(d),
                estimate_hours: 1.0,
            })
            .collect(),
        predicted_completion: date(completion),
        deadline_violation: false,
        rationale: "stub".to_string(),
        confidence: 0.7,
    }
}

/// Integration test: deterministic scheduling persists and survives reload
#[test]
fn test_deterministic_schedule_persists() {
    let dir = TempDir::new().unwrap();

    {
        let store = Arc::new(JsonProjectStore::new(dir.path()).unwrap());
        let service = PlanService::new(store);
        service
            .create_project(
                "alice",
                "Ship the parser",
                Some(date("2025-02-01")),
                blueprint(),
                availability(),
            )
            .unwrap();

        // 2025-01-06 is a Monday: T1 and T2 fill it past 3.2h, T3 lands Tuesday
        let schedule = service.schedule("alice", date("2025-01-06")).unwrap();
        assert_eq!(schedule.scheduled_tasks.len(), 3);
        assert_eq!(schedule.predicted_completion, date("2025-01-07"));
        assert!(!schedule.deadline_violation);
    }

    // Reopen the store and verify the document survived
    {
        let store = JsonProjectStore::new(dir.path()).unwrap();
        let project = store.load("alice").unwrap().unwrap();
        let schedule = project.schedule.unwrap();
        assert_eq!(schedule.scheduled_tasks[0].task_id, "T1");
        assert_eq!(schedule.scheduled_tasks[0].date, date("2025-01-06"));
        assert_eq!(schedule.scheduled_tasks[2].date, date("2025-01-07"));
    }
}

/// Integration test: repair loop steers an invalid candidate to a valid one
#[tokio::test]
async fn test_generative_schedule_repairs_deadline_miss() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonProjectStore::new(dir.path()).unwrap());

    // First candidate misses the deadline, second fixes it
    let generator = ScriptedGenerator::new(vec![
        Ok(candidate(
            &[("T1", "2025-01-06"), ("T2", "2025-01-20"), ("T3", "2025-02-05")],
            "2025-02-05",
        )),
        Ok(candidate(
            &[("T1", "2025-01-06"), ("T2", "2025-01-07"), ("T3", "2025-01-08")],
            "2025-01-08",
        )),
    ]);

    let service = PlanService::with_generator(store, generator);
    service
        .create_project(
            "alice",
            "Ship the parser",
            Some(date("2025-02-01")),
            blueprint(),
            availability(),
        )
        .unwrap();

    let outcome = service
        .schedule_generative("alice", date("2025-01-06"))
        .await
        .unwrap();

    assert!(outcome.is_valid());
    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.schedule.predicted_completion, date("2025-01-08"));
}

/// Integration test: exhausted repair loop still persists the best candidate
#[tokio::test]
async fn test_generative_schedule_best_effort_on_exhaustion() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonProjectStore::new(dir.path()).unwrap());

    let late = candidate(&[("T1", "2025-02-10")], "2025-02-10");
    let generator = ScriptedGenerator::new(vec![Ok(late.clone()), Ok(late)]);

    let service = PlanService::with_generator(store.clone(), generator);
    service
        .create_project(
            "alice",
            "Ship the parser",
            Some(date("2025-02-01")),
            blueprint(),
            availability(),
        )
        .unwrap();

    let outcome = service
        .schedule_generative("alice", date("2025-01-06"))
        .await
        .unwrap();

    assert!(!outcome.is_valid());
    assert_eq!(outcome.attempts, 2);

    // The imperfect schedule is persisted, not dropped
    let project = store.load("alice").unwrap().unwrap();
    assert_eq!(
        project.schedule.unwrap().predicted_completion,
        date("2025-02-10")
    );
}

/// Integration test: replanning requires an existing schedule
#[tokio::test]
async fn test_replan_without_schedule_fails() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonProjectStore::new(dir.path()).unwrap());
    let generator = ScriptedGenerator::new(vec![]);

    let service = PlanService::with_generator(store, generator);
    service
        .create_project("alice", "Ship it", None, blueprint(), availability())
        .unwrap();

    let result = service.replan("alice", "shift everything", date("2025-01-06")).await;
    assert!(result.is_err());
}

/// Integration test: progress flow drives the stall query
#[test]
fn test_progress_and_stall_flow() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonProjectStore::new(dir.path()).unwrap());
    let service = PlanService::new(store);

    service
        .create_project("alice", "Ship it", None, blueprint(), availability())
        .unwrap();
    service.schedule("alice", date("2025-01-06")).unwrap();

    // Nothing done yet: the Monday task is late by Wednesday
    let status = service.status("alice", date("2025-01-08")).unwrap();
    assert_eq!(status.stalled_task_id.as_deref(), Some("T1"));
    assert_eq!(status.stall_urgency, Some(StallUrgency::Late));

    // Completing T1 and T2 surfaces Tuesday's task as due on Tuesday
    service
        .record_progress("alice", "T1", ProgressStatus::Done, date("2025-01-06"))
        .unwrap();
    service
        .record_progress("alice", "T2", ProgressStatus::Done, date("2025-01-06"))
        .unwrap();
    let status = service.status("alice", date("2025-01-07")).unwrap();
    assert_eq!(status.stalled_task_id.as_deref(), Some("T3"));
    assert_eq!(status.stall_urgency, Some(StallUrgency::DueToday));

    // Undoing the completion brings T1 back as the earliest stall
    service.undo_completion("alice", "T1").unwrap();
    let status = service.status("alice", date("2025-01-07")).unwrap();
    assert_eq!(status.stalled_task_id.as_deref(), Some("T1"));

    // Completing everything clears the stall
    service
        .record_progress("alice", "T1", ProgressStatus::Done, date("2025-01-07"))
        .unwrap();
    service
        .record_progress("alice", "T3", ProgressStatus::Done, date("2025-01-07"))
        .unwrap();
    let status = service.status("alice", date("2025-01-07")).unwrap();
    assert_eq!(status.stalled_task_id, None);
}
