//! Player State
//!
//! The read-only view of the player that the host hands to quest logic on
//! each tick. Nothing in this crate mutates it.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuestError, QuestResult};
use crate::ids::ItemId;
use crate::skills::{self, Skill};
use crate::world::WorldPoint;

/// Recorded progress of a quest for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestState {
    NotStarted,
    InProgress,
    Finished,
}

/// Host-provided player state.
///
/// Every accessor returns `None` (or 0) when the host does not know the
/// answer; requirements treat that as unsatisfied.
pub trait PlayerState {
    fn location(&self) -> Option<WorldPoint>;

    fn skill_level(&self, skill: Skill) -> Option<u32>;

    /// Current level including temporary boosts or drains.
    fn boosted_skill_level(&self, skill: Skill) -> Option<u32>;

    fn combat_level(&self) -> Option<u32>;

    /// Total held across inventory and worn equipment.
    fn item_count(&self, item: ItemId) -> u32;

    fn quest_state(&self, quest_id: &str) -> Option<QuestState>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: ItemId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// A plain-data player state, loadable from TOML or JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    pub location: Option<WorldPoint>,
    pub skills: HashMap<Skill, u32>,
    pub boosted_skills: HashMap<Skill, u32>,
    /// Overrides the value derived from combat skills when present
    pub combat_level: Option<u32>,
    pub inventory: Vec<ItemStack>,
    pub equipment: Vec<ItemStack>,
    pub quests: HashMap<String, QuestState>,
}

impl PlayerSnapshot {
    pub fn at(location: WorldPoint) -> Self {
        Self {
            location: Some(location),
            ..Self::default()
        }
    }

    pub fn with_skill(mut self, skill: Skill, level: u32) -> Self {
        self.skills.insert(skill, level);
        self
    }

    pub fn with_item(mut self, id: ItemId, quantity: u32) -> Self {
        self.inventory.push(ItemStack { id, quantity });
        self
    }

    pub fn with_quest(mut self, quest_id: &str, state: QuestState) -> Self {
        self.quests.insert(quest_id.to_string(), state);
        self
    }

    /// Load a snapshot file. `.json` files are read as JSON, anything else
    /// as TOML.
    pub fn load(path: &Path) -> QuestResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| QuestError::io(path, e))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|source| QuestError::Json {
                path: path.to_path_buf(),
                source,
            })
        } else {
            toml::from_str(&content).map_err(|source| QuestError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

impl PlayerState for PlayerSnapshot {
    fn location(&self) -> Option<WorldPoint> {
        self.location
    }

    fn skill_level(&self, skill: Skill) -> Option<u32> {
        self.skills.get(&skill).copied()
    }

    fn boosted_skill_level(&self, skill: Skill) -> Option<u32> {
        self.boosted_skills.get(&skill).copied()
    }

    fn combat_level(&self) -> Option<u32> {
        self.combat_level
            .or_else(|| skills::combat_level(|s| self.skill_level(s)))
    }

    fn item_count(&self, item: ItemId) -> u32 {
        self.inventory
            .iter()
            .chain(self.equipment.iter())
            .filter(|stack| stack.id == item)
            .map(|stack| stack.quantity)
            .fold(0u32, u32::saturating_add)
    }

    fn quest_state(&self, quest_id: &str) -> Option<QuestState> {
        self.quests.get(quest_id).copied()
    }
}
