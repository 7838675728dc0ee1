//! Plan generator capability
//!
//! The generator is an external, non-deterministic collaborator: given the
//! scheduling inputs plus accumulated correction directives, it returns a
//! candidate schedule. It may be slow, may time out, and may return output
//! that is not a schedule at all; every failure mode is surfaced as a hard
//! failure of that one attempt.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::Schedule;
use crate::engine::Violation;
use crate::planner::request::PlanRequest;

/// Errors from a single generator invocation.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing API key: environment variable {0} not set")]
    MissingApiKey(String),
}

/// An external plan generator.
///
/// Implementations are opaque to the repair loop; a deterministic stub stands
/// in for the real HTTP-backed generator in tests.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Produce a candidate schedule for the request.
    ///
    /// `feedback` is the growing list of violations found in earlier
    /// candidates; implementations render it into their correction
    /// directive.
    async fn generate(
        &self,
        request: &PlanRequest,
        feedback: &[Violation],
    ) -> Result<Schedule, GeneratorError>;
}
