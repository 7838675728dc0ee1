//! JSON file-based project store.
//!
//! One pretty-printed JSON document per user under the base directory. Saves
//! write the whole document; there is no incremental patch path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Project;
use crate::error::{PlannrError, Result};
use crate::storage::traits::ProjectStore;

/// File-per-user JSON document store.
pub struct JsonProjectStore {
    base_path: PathBuf,
}

impl JsonProjectStore {
    /// Create a store rooted at the given directory, creating it if needed.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    fn document_path(&self, user_id: &str) -> Result<PathBuf> {
        // User ids become file names; reject separators rather than let a
        // crafted id escape the base directory.
        if user_id.is_empty() || user_id.contains(['/', '\\', '.']) {
            return Err(PlannrError::Storage(format!(
                "invalid user id: {:?}",
                user_id
            )));
        }
        Ok(self.base_path.join(format!("{}.json", user_id)))
    }
}

impl ProjectStore for JsonProjectStore {
    fn load(&self, user_id: &str) -> Result<Option<Project>> {
        let path = self.document_path(user_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let project: Project = serde_json::from_str(&content)?;
        Ok(Some(project))
    }

    fn save(&self, project: &Project) -> Result<()> {
        let path = self.document_path(&project.user_id)?;
        let content = serde_json::to_string_pretty(project)?;
        fs::write(&path, content)?;
        log::debug!("saved project {} to {}", project.id, path.display());
        Ok(())
    }

    fn delete(&self, user_id: &str) -> Result<()> {
        let path = self.document_path(user_id)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn list_users(&self) -> Result<Vec<String>> {
        let mut users = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    users.push(stem.to_string());
                }
            }
        }
        users.sort();
        Ok(users)
    }
}
