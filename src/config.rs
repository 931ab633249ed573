//! Runtime configuration for the `quest-guide` binary.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{QuestError, QuestResult};

pub const DEFAULT_CONFIG_FILE: &str = "quest-guide.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Directory containing `quests/`
    pub data_dir: PathBuf,
    /// Default tracing directive; `RUST_LOG` takes precedence
    pub log_filter: String,
    /// Register the quests compiled into the binary
    pub builtin_quests: bool,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_filter: "quest_guide=info".to_string(),
            builtin_quests: true,
        }
    }
}

impl GuideConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> QuestResult<Self> {
        if !path.exists() {
            warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| QuestError::io(path, e))?;
        toml::from_str(&content).map_err(|source| QuestError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = GuideConfig::load(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, GuideConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "data_dir = \"content\"\nbuiltin_quests = false\n").unwrap();

        let config = GuideConfig::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("content"));
        assert!(!config.builtin_quests);
        assert_eq!(config.log_filter, "quest_guide=info");
    }
}
