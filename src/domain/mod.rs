//! Domain types for Plannr
//!
//! The persisted project document and everything nested inside it:
//! milestones, tasks, availability, schedules, and progress events.

pub mod availability;
pub mod progress;
pub mod project;
pub mod schedule;
pub mod task;

pub use availability::Availability;
pub use progress::{ProgressEvent, ProgressStatus};
pub use project::Project;
pub use schedule::{Schedule, ScheduledTask};
pub use task::{Guidance, Milestone, Priority, Task};
