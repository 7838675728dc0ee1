//! Prompt rendering for the plan generator
//!
//! Builds the instruction text for both request kinds and appends the
//! critical-feedback block rendered from accumulated violation records.

use crate::engine::Violation;
use crate::planner::request::{PlanRequest, ReplanRequest, ScheduleRequest};

/// Render the full prompt for a request, feedback included.
pub fn render(request: &PlanRequest, feedback: &[Violation]) -> String {
    let mut prompt = match request {
        PlanRequest::Schedule(r) => render_schedule(r),
        PlanRequest::Replan(r) => render_replan(r),
    };

    if !feedback.is_empty() {
        prompt.push_str(&critical_feedback(feedback));
    }

    prompt
}

fn render_schedule(request: &ScheduleRequest) -> String {
    format!(
        r#"You are a calendar-aware scheduler. Given milestones+tasks, user availability, and calendar constraints, assign each task a date (YYYY-MM-DD). Output JSON only.

IN: {{
  "today": "{today}",
  "milestones": {milestones},
  "deadline": {deadline},
  "user_availability": {availability}
}}

Output:

{{
  "scheduled_tasks": [
    {{"task_id": "T1", "date": "YYYY-MM-DD", "estimate_hours": 2}}
  ],
  "predicted_completion": "YYYY-MM-DD",
  "deadline_violation": false,
  "rationale": "<short: why tasks were placed this way>",
  "confidence": 0.0
}}

Rules:
1. Respect declared milestone dependencies.
2. Do NOT exceed max_daily_utilization of hours_per_day on any date.
3. STRICTLY meet the deadline if physically possible. Compress the schedule if needed.
4. Do NOT duplicate tasks. Each task id from milestones must appear exactly once.
5. Schedule only on the listed workdays."#,
        today = request.today,
        milestones = json_or_empty(&request.milestones),
        deadline = deadline_literal(request.deadline),
        availability = json_or_empty(&request.availability),
    )
}

fn render_replan(request: &ReplanRequest) -> String {
    format!(
        r#"You are an adaptive planner. Given the original plan, recorded progress, and an optional user instruction, produce a revised schedule. Output JSON only, in the same shape as the original plan.

IN: {{
  "today": "{today}",
  "current_plan": {plan},
  "progress_updates": {progress},
  "user_availability": {availability},
  "deadline": {deadline},
  "user_instruction": "{instruction}"
}}

Rules:
1. Minimize movement of completed tasks.
2. Do NOT duplicate tasks; each task id appears exactly once.
3. Keep the rationale very brief."#,
        today = request.today,
        plan = json_or_empty(&request.current_plan),
        progress = json_or_empty(&request.progress),
        availability = json_or_empty(&request.availability),
        deadline = deadline_literal(request.deadline),
        instruction = request.instruction,
    )
}

/// The correction directive appended after a failed validation pass.
fn critical_feedback(feedback: &[Violation]) -> String {
    let joined = feedback
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "\n\nCRITICAL FEEDBACK: Your previous schedule had errors: {} Fix them immediately and output the corrected JSON.",
        joined
    )
}

fn json_or_empty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn deadline_literal(deadline: Option<chrono::NaiveDate>) -> String {
    match deadline {
        Some(d) => format!("\"{}\"", d),
        None => "null".to_string(),
    }
}
