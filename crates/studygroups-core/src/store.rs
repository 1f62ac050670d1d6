//! Local session storage.
//!
//! The engine itself keeps no state between calls. The command-line front
//! end needs the groups from one invocation to edit them in the next, so
//! the last session is saved as JSON in the cache directory along with the
//! time it was written.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::Session;

/// Default session file name inside the cache directory.
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub session: Session,
    pub saved_at: DateTime<Utc>,
    /// Roster file the session was built from, if known.
    #[serde(default)]
    pub source: Option<PathBuf>,
}

impl StoredSession {
    pub fn new(session: Session, source: Option<PathBuf>) -> Self {
        Self {
            session,
            saved_at: Utc::now(),
            source,
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.saved_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store rooted in `dir`, creating it if needed.
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create session directory: {}", dir.display()))?;
        Ok(Self {
            path: dir.join(SESSION_FILE),
        })
    }

    /// Store backed by an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;
        let stored: StoredSession = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session file: {}", self.path.display()))?;

        debug!(
            groups = stored.session.groups.len(),
            people = stored.session.people.len(),
            age = %stored.age_display(),
            "Session loaded"
        );
        Ok(Some(stored))
    }

    /// Load the saved session or fail with a hint to run matching first.
    pub fn require(&self) -> Result<StoredSession> {
        self.load()?.ok_or_else(|| {
            anyhow::anyhow!(
                "No saved session at {}. Run `studygroups match <ROSTER>` first.",
                self.path.display()
            )
        })
    }

    pub fn save(&self, stored: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(stored)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }
}
