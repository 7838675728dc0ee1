//! Greedy allocator
//!
//! Walks tasks in milestone-then-task order and assigns each one to a single
//! calendar date. The walk keeps a cursor date and an accumulator of hours
//! already committed on that date; a task is always assigned whole, never
//! split across days and never clipped to the remaining capacity. An
//! oversized task may therefore locally exceed the nominal daily capacity;
//! that is intentional and must be preserved for compatibility with
//! persisted schedules.

use chrono::NaiveDate;

use crate::domain::{Availability, Schedule, ScheduledTask, Task};
use crate::engine::calendar::{daily_capacity, is_workday};

/// Minimum schedulable slice of a day, in hours. A day with less remaining
/// capacity than this takes no further tasks.
pub const MIN_SLICE_HOURS: f64 = 0.5;

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Assign every task to a date, in input order.
///
/// Never fails: missing or non-positive estimates default to one hour, and
/// malformed availability falls back to its defaults. The output is
/// deterministic for a fixed (tasks, availability, start) triple.
pub fn allocate<'a, I>(
    tasks: I,
    availability: &Availability,
    start: NaiveDate,
    deadline: Option<NaiveDate>,
) -> Schedule
where
    I: IntoIterator<Item = &'a Task>,
{
    let capacity = daily_capacity(availability);
    let mut cursor = start;
    let mut day_used = 0.0_f64;
    let mut scheduled_tasks = Vec::new();

    for task in tasks {
        // Find the next workday with at least a minimum slice free. The
        // accumulator resets whenever the cursor moves.
        loop {
            if !is_workday(availability, cursor) {
                cursor = next_day(cursor);
                day_used = 0.0;
                continue;
            }
            if capacity - day_used < MIN_SLICE_HOURS {
                cursor = next_day(cursor);
                day_used = 0.0;
                continue;
            }
            break;
        }

        let estimate = task.effective_estimate();
        scheduled_tasks.push(ScheduledTask {
            task_id: task.id.clone(),
            date: cursor,
            estimate_hours: estimate,
        });

        day_used += estimate;
        if day_used >= capacity {
            cursor = next_day(cursor);
            day_used = 0.0;
        }
    }

    let predicted_completion = scheduled_tasks.last().map(|st| st.date).unwrap_or(start);
    let deadline_violation = deadline.is_some_and(|d| predicted_completion > d);

    Schedule {
        scheduled_tasks,
        predicted_completion,
        deadline_violation,
        rationale: "Tasks placed in milestone order on the earliest workday with remaining capacity."
            .to_string(),
        confidence: 1.0,
    }
}
