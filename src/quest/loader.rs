//! Quest File Loader
//!
//! Quest data files are TOML. Every section is an ordered array of tables so
//! authoring order survives into the built definition. Entries refer to each
//! other by `key`, and are fed through [`QuestBuilder`] in setup order, so a
//! file gets exactly the same checks as a quest written in Rust.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{QuestError, QuestResult};
use crate::ids::{ItemId, NpcId, ObjectId};
use crate::player::QuestState;
use crate::skills::Skill;
use crate::world::WorldPoint;

use super::definition::{QuestBuilder, QuestDefinition};
use super::item::ItemRequirement;
use super::requirement::Requirement;
use super::step::QuestStep;

/// A quest file as it appears on disk
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestFile {
    pub quest: RawQuestHeader,
    #[serde(default)]
    pub zones: Vec<RawZone>,
    #[serde(default)]
    pub items: Vec<RawItem>,
    /// Named conditions usable by router branches
    #[serde(default)]
    pub conditions: Vec<RawRequirement>,
    /// Prerequisites for starting the quest
    #[serde(default)]
    pub requirements: Vec<RawRequirement>,
    #[serde(default)]
    pub steps: Vec<RawStep>,
    #[serde(default)]
    pub routers: Vec<RawRouter>,
    #[serde(default)]
    pub stages: Vec<RawStage>,
    #[serde(default)]
    pub panels: Vec<RawPanel>,
    #[serde(default)]
    pub rewards: RawRewards,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestHeader {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub required_items: Vec<String>,
    #[serde(default)]
    pub recommended_items: Vec<String>,
    #[serde(default)]
    pub combat_requirements: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawZone {
    pub key: String,
    pub a: WorldPoint,
    pub b: WorldPoint,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub ids: Vec<ItemId>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub obtainable_during_quest: bool,
    pub tooltip: Option<String>,
    pub display_icon: Option<ItemId>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawRequirementType {
    Zone,
    Skill,
    Quest,
    CombatLevel,
}

/// Requirement entry; which optional fields are needed depends on `type`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRequirement {
    pub key: Option<String>,
    #[serde(rename = "type")]
    pub kind: RawRequirementType,
    pub zone: Option<String>,
    pub skill: Option<Skill>,
    pub level: Option<u32>,
    #[serde(default)]
    pub boostable: bool,
    pub quest: Option<String>,
    /// Display name of the prerequisite quest
    pub name: Option<String>,
    pub state: Option<QuestState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawStepType {
    Npc,
    Object,
    Tile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStep {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: RawStepType,
    pub text: String,
    pub npc: Option<NpcId>,
    pub object: Option<ObjectId>,
    pub location: Option<WorldPoint>,
    #[serde(default)]
    pub dialogue: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRouter {
    pub key: String,
    /// Step or router declared earlier in the file
    pub default: String,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub branches: Vec<RawBranch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBranch {
    pub condition: String,
    pub step: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStage {
    pub stage: u32,
    pub step: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPanel {
    pub header: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRewards {
    pub quest_points: Option<u32>,
    #[serde(default)]
    pub experience: Vec<RawExperience>,
    #[serde(default)]
    pub unlocks: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawExperience {
    pub skill: Skill,
    pub amount: u32,
}

fn require<T>(value: Option<T>, quest: &str, entry: &str, field: &'static str) -> QuestResult<T> {
    value.ok_or_else(|| QuestError::MissingField {
        quest: quest.to_string(),
        entry: entry.to_string(),
        field,
    })
}

impl RawItem {
    fn to_requirement(&self) -> QuestResult<ItemRequirement> {
        let mut item = ItemRequirement::new(&self.name, self.ids.iter().copied())
            .with_quantity(self.quantity)?;
        item.obtainable_during_quest = self.obtainable_during_quest;
        item.tooltip = self.tooltip.clone();
        item.display_icon = self.display_icon;
        Ok(item)
    }
}

impl RawRequirement {
    fn to_requirement(&self, builder: &QuestBuilder, entry: &str) -> QuestResult<Requirement> {
        let quest = builder.id();
        match self.kind {
            RawRequirementType::Zone => {
                let zone = require(self.zone.as_deref(), quest, entry, "zone")?;
                builder.zone_requirement(zone)
            }
            RawRequirementType::Skill => Ok(Requirement::Skill {
                skill: require(self.skill, quest, entry, "skill")?,
                level: require(self.level, quest, entry, "level")?,
                boostable: self.boostable,
            }),
            RawRequirementType::Quest => {
                let quest_id = require(self.quest.clone(), quest, entry, "quest")?;
                Ok(Requirement::Quest {
                    quest_name: self.name.clone().unwrap_or_else(|| quest_id.clone()),
                    quest_id,
                    state: self.state.unwrap_or(QuestState::Finished),
                })
            }
            RawRequirementType::CombatLevel => Ok(Requirement::CombatLevel(require(
                self.level, quest, entry, "level",
            )?)),
        }
    }
}

impl RawStep {
    fn to_step(&self, quest: &str) -> QuestResult<QuestStep> {
        let step = match self.kind {
            RawStepType::Npc => {
                let npc = require(self.npc, quest, &self.key, "npc")?;
                match self.location {
                    Some(location) => QuestStep::npc_at(&self.key, npc, location, &self.text),
                    None => QuestStep::npc(&self.key, npc, &self.text),
                }
            }
            RawStepType::Object => QuestStep::object(
                &self.key,
                require(self.object, quest, &self.key, "object")?,
                require(self.location, quest, &self.key, "location")?,
                &self.text,
            ),
            RawStepType::Tile => QuestStep::tile(
                &self.key,
                require(self.location, quest, &self.key, "location")?,
                &self.text,
            ),
        };

        let mut step = step.with_dialogue(self.dialogue.iter().cloned());
        step.extra_text.extend(self.notes.iter().cloned());
        Ok(step)
    }
}

impl RawQuestFile {
    /// Feed every section through the builder in setup order.
    pub fn into_definition(self) -> QuestResult<QuestDefinition> {
        let mut builder = QuestBuilder::new(&self.quest.id, &self.quest.name);

        for zone in &self.zones {
            builder.zone(&zone.key, zone.a, zone.b)?;
        }

        for item in &self.items {
            builder.item(&item.key, item.to_requirement()?)?;
        }
        for key in &self.quest.required_items {
            builder.required_item(key)?;
        }
        for key in &self.quest.recommended_items {
            builder.recommended_item(key)?;
        }

        for (i, raw) in self.conditions.iter().enumerate() {
            let key = require(raw.key.as_deref(), &self.quest.id, &format!("conditions[{}]", i), "key")?;
            let requirement = raw.to_requirement(&builder, key)?;
            builder.condition(key, requirement)?;
        }
        for (i, raw) in self.requirements.iter().enumerate() {
            let requirement = raw.to_requirement(&builder, &format!("requirements[{}]", i))?;
            builder.general_requirement(requirement);
        }
        for description in &self.quest.combat_requirements {
            builder.combat_requirement(description);
        }

        for raw in &self.steps {
            builder.step(raw.to_step(&self.quest.id)?)?;
        }

        // A router's default must be declared above it; branches are wired
        // once every router exists, so they may target any router.
        for router in &self.routers {
            builder.router(&router.key, &router.default)?;
            for note in &router.notes {
                builder.step_text(&router.key, note)?;
            }
        }
        for router in &self.routers {
            for branch in &router.branches {
                builder.branch(&router.key, &branch.condition, &branch.step)?;
            }
        }

        for stage in &self.stages {
            builder.stage(stage.stage, &stage.step)?;
        }
        for panel in &self.panels {
            let steps: Vec<&str> = panel.steps.iter().map(String::as_str).collect();
            let items: Vec<&str> = panel.items.iter().map(String::as_str).collect();
            builder.panel(&panel.header, &steps, &items)?;
        }

        if let Some(count) = self.rewards.quest_points {
            builder.quest_points(count);
        }
        for xp in &self.rewards.experience {
            builder.experience(xp.skill, xp.amount);
        }
        for unlock in &self.rewards.unlocks {
            builder.unlock(unlock);
        }

        builder.build()
    }
}

/// Parse quest TOML; `path` is only used in error messages.
pub fn parse_quest(content: &str, path: &Path) -> QuestResult<QuestDefinition> {
    let raw: RawQuestFile = toml::from_str(content).map_err(|source| QuestError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Parsed quest file {:?} ({})", path, raw.quest.id);
    raw.into_definition()
}

pub fn load_quest_file(path: &Path) -> QuestResult<QuestDefinition> {
    let content = std::fs::read_to_string(path).map_err(|e| QuestError::io(path, e))?;
    parse_quest(&content, path)
}
