//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - new: create a project from a goal and a blueprint file
//! - schedule: build the day-by-day schedule
//! - replan: revise the schedule against recorded progress
//! - status / show: inspect the project and its schedule
//! - done / skip / undo: record progress

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plannr - a calendar-aware project planner
#[derive(Parser, Debug)]
#[command(name = "plannr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// User the project belongs to
    #[arg(short, long, global = true, default_value = "default_user")]
    pub user: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a project from a goal and a milestone blueprint
    New {
        /// Goal description
        goal: String,

        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<NaiveDate>,

        /// Path to a JSON blueprint of milestones and tasks
        #[arg(short, long)]
        blueprint: Option<PathBuf>,
    },

    /// Assign every task a calendar date
    Schedule {
        /// Use the AI plan generator instead of the deterministic allocator
        #[arg(short, long)]
        generate: bool,
    },

    /// Revise the schedule against recorded progress
    Replan {
        /// Optional instruction for the planner
        instruction: Option<String>,
    },

    /// Show the project with stall detection
    Status,

    /// Print the current schedule day by day
    Show,

    /// Mark a task done
    Done {
        /// Task id to mark done
        task_id: String,
    },

    /// Mark a task skipped
    Skip {
        /// Task id to skip
        task_id: String,
    },

    /// Undo the most recent completion of a task
    Undo {
        /// Task id to un-complete
        task_id: String,
    },
}
