//! Repair loop
//!
//! Pairs the plan validator with the external generator: run the generator,
//! validate the candidate, and on violations retry with the accumulated
//! correction records, up to a hard attempt ceiling. On exhaustion the last
//! candidate is returned with its outstanding violations rather than thrown
//! away; the call errors only when no candidate was ever produced.

use std::sync::Arc;

use crate::domain::Schedule;
use crate::engine::{validate, Violation};
use crate::error::{PlannrError, Result};
use crate::planner::generator::PlanGenerator;
use crate::planner::request::PlanRequest;

/// Hard ceiling on generator invocations per request.
pub const MAX_ATTEMPTS: u32 = 2;

/// What the repair loop produced.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    /// The best (last) candidate schedule
    pub schedule: Schedule,

    /// Generator invocations consumed, including failed ones
    pub attempts: u32,

    /// Violations still present in the returned candidate
    pub violations: Vec<Violation>,
}

impl RepairOutcome {
    /// True when the returned schedule passed validation.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Bounded generate-check-repair controller around a plan generator.
pub struct RepairLoop {
    generator: Arc<dyn PlanGenerator>,
    max_attempts: u32,
}

impl RepairLoop {
    pub fn new(generator: Arc<dyn PlanGenerator>) -> Self {
        Self {
            generator,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Override the attempt ceiling (tests only lower or raise it; the
    /// production paths use [`MAX_ATTEMPTS`]).
    pub fn with_max_attempts(generator: Arc<dyn PlanGenerator>, max_attempts: u32) -> Self {
        Self {
            generator,
            max_attempts,
        }
    }

    /// Run the generator until a candidate validates or attempts run out.
    ///
    /// A generator failure (timeout, malformed output) consumes an attempt
    /// but leaves the accumulated feedback untouched for the next one.
    pub async fn run(&self, request: &PlanRequest) -> Result<RepairOutcome> {
        let mut feedback: Vec<Violation> = Vec::new();
        let mut last_candidate: Option<(Schedule, Vec<Violation>)> = None;
        let mut last_error: Option<String> = None;
        let mut attempts = 0;

        while attempts < self.max_attempts {
            attempts += 1;

            match self.generator.generate(request, &feedback).await {
                Ok(candidate) => {
                    let violations = validate(&candidate, request.deadline());
                    if violations.is_empty() {
                        log::info!("plan accepted on attempt {}", attempts);
                        return Ok(RepairOutcome {
                            schedule: candidate,
                            attempts,
                            violations,
                        });
                    }

                    log::info!(
                        "attempt {} rejected with {} violation(s)",
                        attempts,
                        violations.len()
                    );
                    feedback.extend(violations.iter().cloned());
                    last_candidate = Some((candidate, violations));
                }
                Err(e) => {
                    log::warn!("generator attempt {} failed: {}", attempts, e);
                    last_error = Some(e.to_string());
                }
            }
        }

        match last_candidate {
            Some((schedule, violations)) => Ok(RepairOutcome {
                schedule,
                attempts,
                violations,
            }),
            None => Err(PlannrError::Generator(
                last_error.unwrap_or_else(|| "no candidate schedule produced".to_string()),
            )),
        }
    }
}
