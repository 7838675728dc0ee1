//! Error types for Plannr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Plannr
#[derive(Debug, Error)]
pub enum PlannrError {
    /// Project not found in storage
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Task not found in the project's milestones
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Invalid operation for the project's current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Plan generator failure (timeout, malformed output, API error)
    #[error("Generator error: {0}")]
    Generator(String),

    /// Storage/persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Plannr operations
pub type Result<T> = std::result::Result<T, PlannrError>;
