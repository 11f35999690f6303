//! File-backed persistence for [`AutomationState`].

use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::{AutomationState, error::StateError};

/// Loads and saves the automation state at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state. An absent file is a default state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the file exists but cannot be read or
    /// parsed. Callers that can tolerate losing state should use
    /// [`Self::load_or_default`].
    pub fn load(&self) -> Result<AutomationState, StateError> {
        if !self.path.exists() {
            return Ok(AutomationState::default());
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|source| StateError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StateError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the state, recovering from an unreadable file by starting from
    /// a default state (with a warning). This is the orchestrator's entry
    /// point: an unloadable record must not block the run.
    #[must_use]
    pub fn load_or_default(&self) -> AutomationState {
        match self.load() {
            Ok(state) => state,
            Err(error) => {
                tracing::warn!(%error, "failed to load state, starting from empty state");
                AutomationState::default()
            }
        }
    }

    /// Persist the state atomically: write to a temp file in the same
    /// directory, then rename over the target.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] on serialization or I/O failure. Callers must
    /// treat this as fatal — claiming success without persisted state would
    /// cause duplicate generation on the next run.
    pub fn save(&self, state: &AutomationState) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(state).map_err(StateError::Serialize)?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|source| StateError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|source| StateError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        tmp.write_all(json.as_bytes())
            .map_err(|source| StateError::Io {
                path: tmp.path().to_path_buf(),
                source,
            })?;
        tmp.persist(&self.path).map_err(|error| StateError::Io {
            path: self.path.clone(),
            source: error.error,
        })?;

        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cur_core::AppRecord;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &tempfile::TempDir) -> StateStore {
        StateStore::new(dir.path().join("data").join("state.json"))
    }

    #[test]
    fn absent_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let state = store.load().unwrap();
        assert_eq!(state.total_apps(), 0);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut state = AutomationState::default();
        state.stats.total_apps_generated = 7;
        state.stats.total_bugs_fixed = 2;
        state.register(AppRecord {
            key: "rag_on_aws/legal-rag".to_string(),
            name: "Legal RAG".to_string(),
            category: "rag_on_aws".to_string(),
            aws_services: vec!["bedrock".to_string()],
            created_at: chrono::Utc::now(),
            last_reviewed_at: None,
        });
        store.save(&state).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.stats, state.stats);
        assert_eq!(loaded.total_apps(), 1);
        assert!(loaded.contains_key("rag_on_aws/legal-rag"));
        assert_eq!(loaded.category_count("rag_on_aws"), 1);
    }

    #[test]
    fn corrupt_file_errors_on_load_but_recovers_via_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json {").unwrap();

        assert!(matches!(store.load(), Err(StateError::Corrupt { .. })));
        let state = store.load_or_default();
        assert_eq!(state.total_apps(), 0);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("a").join("b").join("state.json"));
        store.save(&AutomationState::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn save_overwrites_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut state = AutomationState::default();
        store.save(&state).unwrap();
        state.stats.total_apps_generated = 1;
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap().stats.total_apps_generated, 1);
    }
}
