//! Plannr - a calendar-aware project planner
//!
//! Plannr turns milestones, a deadline, and a user's daily availability into a
//! day-by-day schedule, either deterministically (greedy allocator) or through
//! a bounded generate-check-repair loop around an external plan generator.

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod id;
pub mod planner;
pub mod service;
pub mod storage;

pub use error::{PlannrError, Result};
