//! General (non-section-specific) configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_state_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory the persisted automation state lives in.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

impl GeneralConfig {
    /// Path of the persisted state file.
    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.state_dir.join("state.json")
    }

    /// Override the state directory (CLI `--state-dir`).
    pub fn set_state_dir(&mut self, dir: &Path) {
        self.state_dir = dir.to_path_buf();
    }
}
