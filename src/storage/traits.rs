//! Storage trait definitions.

use crate::domain::Project;
use crate::error::Result;

/// Document store for project records, keyed by user id.
pub trait ProjectStore: Send + Sync {
    /// Load a user's project, if one exists.
    fn load(&self, user_id: &str) -> Result<Option<Project>>;

    /// Save a project, replacing any existing document for the user.
    fn save(&self, project: &Project) -> Result<()>;

    /// Delete a user's project. Deleting a missing document is not an error.
    fn delete(&self, user_id: &str) -> Result<()>;

    /// List the user ids with a stored project.
    fn list_users(&self) -> Result<Vec<String>>;
}
