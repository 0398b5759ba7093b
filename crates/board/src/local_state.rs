use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOCAL_STATE_FILE_NAME: &str = ".board-state.json";

/// Flags remembered between runs
/// Only the onboarding flag survives a restart; the board itself never does
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct LocalState {
    #[serde(default)]
    pub onboarding_seen: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seen_at: Option<DateTime<Utc>>,
}

/// State file in the current directory
pub fn default_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(LOCAL_STATE_FILE_NAME))
}

impl LocalState {
    /// Load state, treating a missing file as "nothing seen yet"
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read local state: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse local state")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write local state: {}", path.display()))?;
        Ok(())
    }

    pub fn mark_seen(&mut self, at: DateTime<Utc>) {
        self.onboarding_seen = true;
        self.seen_at = Some(at);
    }

    /// Delete the state file so onboarding shows again
    pub fn delete(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to delete local state: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_not_seen() {
        let dir = tempfile::tempdir().unwrap();
        let state = LocalState::load(&dir.path().join("state.json")).unwrap();
        assert!(!state.onboarding_seen);
    }

    #[test]
    fn seen_flag_round_trips_and_resets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = LocalState::default();
        state.mark_seen(Utc::now());
        state.save(&path).unwrap();
        assert!(LocalState::load(&path).unwrap().onboarding_seen);

        LocalState::delete(&path).unwrap();
        assert!(!path.exists());
        assert!(!LocalState::load(&path).unwrap().onboarding_seen);
        // Deleting twice is fine
        LocalState::delete(&path).unwrap();
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();
        assert!(LocalState::load(&path).is_err());
    }
}
