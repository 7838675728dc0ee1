//! Scheduling engine
//!
//! Pure, synchronous functions over immutable inputs: the calendar model, the
//! greedy allocator, the plan validator, and the stall detector. Safe to call
//! concurrently for different plans; nothing in here performs I/O.

pub mod allocator;
pub mod calendar;
pub mod stall;
pub mod validator;

pub use allocator::allocate;
pub use calendar::{daily_capacity, is_workday};
pub use stall::{detect_stall, Stall, StallUrgency};
pub use validator::{validate, Violation};
