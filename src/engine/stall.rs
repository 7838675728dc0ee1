//! Stall detector
//!
//! Finds the earliest scheduled task whose date has arrived without a "done"
//! progress event. At most one task is reported; a task scheduled strictly
//! before today is distinguished as late from one merely due today.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{progress, ProgressEvent, Schedule};

/// How urgent a stalled task is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StallUrgency {
    /// Scheduled date is strictly before today
    Late,
    /// Scheduled date is today
    DueToday,
}

/// A stalled task reference, consumed by presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stall {
    pub task_id: String,
    pub urgency: StallUrgency,
}

/// Report the earliest (by date) scheduled task at or before `today` with no
/// matching "done" event, or None when every due task is complete.
pub fn detect_stall(
    schedule: &Schedule,
    events: &[ProgressEvent],
    today: NaiveDate,
) -> Option<Stall> {
    let candidate = schedule
        .by_date()
        .into_iter()
        .find(|st| st.date <= today && !progress::is_done(events, &st.task_id))?;

    let urgency = if candidate.date < today {
        StallUrgency::Late
    } else {
        StallUrgency::DueToday
    };

    Some(Stall {
        task_id: candidate.task_id.clone(),
        urgency,
    })
}
