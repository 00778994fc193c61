//! Session identity persisted as a JSON file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use goquiz_core::model::UserRecord;
use goquiz_core::traits::SessionStore;

/// A [`SessionStore`] backed by a single JSON file.
///
/// A missing file means nobody is logged in.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<UserRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session: {}", self.path.display()))?;
        let user = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse session: {}", self.path.display()))?;
        Ok(Some(user))
    }

    fn set(&self, user: &UserRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write session: {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}
