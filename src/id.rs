//! ID generation utilities for Plannr
//!
//! Provides functions for generating unique identifiers for projects and
//! progress events.

use rand::Rng;

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Generate a unique project ID
///
/// Format: `proj-{timestamp_ms}-{random_hex}`
/// Example: `proj-1738300800123-a1b2`
pub fn generate_project_id() -> String {
    let random: u16 = rand::rng().random();
    format!("proj-{}-{:04x}", now_ms(), random)
}

/// Generate a task ID within a milestone
///
/// Format: `{milestone_id}-T{index}`
/// Example: For milestone "M1" and index 3: "M1-T3"
pub fn generate_task_id(milestone_id: &str, index: u32) -> String {
    format!("{}-T{}", milestone_id, index)
}
