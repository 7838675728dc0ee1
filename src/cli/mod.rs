//! CLI module for plannr - command-line interface and subcommands.

pub mod commands;

pub use commands::{Cli, Commands};
