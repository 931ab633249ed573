//! Quest Registry
//!
//! Loads and caches quest definitions. Quests come from the built-in set and
//! from TOML files under `<data_dir>/quests`. A quest that fails to load is
//! logged and skipped; the rest stay available.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{QuestError, QuestResult};
use crate::quests;

use super::definition::QuestDefinition;
use super::loader::load_quest_file;

/// Registry for all quest definitions
#[derive(Default)]
pub struct QuestRegistry {
    quests: HashMap<String, Arc<QuestDefinition>>,
}

impl QuestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing any earlier quest with the same id
    pub fn insert(&mut self, quest: QuestDefinition) {
        if self.quests.contains_key(&quest.id) {
            warn!("Duplicate quest ID '{}', overwriting", quest.id);
        }
        info!("Loaded quest: {} ({})", quest.name, quest.id);
        self.quests.insert(quest.id.clone(), Arc::new(quest));
    }

    /// Register the quests compiled into this crate
    pub fn register_builtin(&mut self) -> usize {
        let mut count = 0;
        for build in quests::BUILTIN {
            match build() {
                Ok(quest) => {
                    self.insert(quest);
                    count += 1;
                }
                Err(e) => warn!("Built-in quest unavailable: {}", e),
            }
        }
        count
    }

    /// Load all quest files below `<data_dir>/quests`, returning how many
    /// loaded successfully.
    pub fn load_from_directory(&mut self, data_dir: &Path) -> QuestResult<usize> {
        let quests_dir = data_dir.join("quests");
        info!("Loading quests from {:?}", quests_dir);

        if !quests_dir.exists() {
            warn!("Quest directory does not exist: {:?}", quests_dir);
            return Ok(0);
        }

        let mut paths = Vec::new();
        collect_quest_files(&quests_dir, &mut paths)?;
        paths.sort();

        let mut count = 0;
        for path in paths {
            match load_quest_file(&path) {
                Ok(quest) => {
                    self.insert(quest);
                    count += 1;
                }
                Err(e) => warn!("Failed to load quest {:?}: {}", path, e),
            }
        }

        info!("Loaded {} quest definitions from {:?}", count, quests_dir);
        Ok(count)
    }

    pub fn get(&self, quest_id: &str) -> Option<Arc<QuestDefinition>> {
        self.quests.get(quest_id).cloned()
    }

    /// All quest IDs, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.quests.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

fn collect_quest_files(dir: &Path, paths: &mut Vec<PathBuf>) -> QuestResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| QuestError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| QuestError::io(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            collect_quest_files(&path, paths)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }

    Ok(())
}
