//! Guidance View
//!
//! A render-ready snapshot of what the player should see for a quest at a
//! given stage. The host can draw it directly, serialize it to JSON, or
//! print it through its `Display` impl.

use std::fmt;

use serde::Serialize;

use crate::ids::{ItemId, NpcId, ObjectId};
use crate::player::PlayerState;
use crate::world::WorldPoint;

use super::definition::QuestDefinition;
use super::item::ItemRequirement;
use super::step::{QuestStep, StepKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepTarget {
    Npc {
        npc: NpcId,
        location: Option<WorldPoint>,
    },
    Object {
        object: ObjectId,
        location: WorldPoint,
    },
    Tile {
        location: WorldPoint,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveStep {
    pub key: String,
    pub text: String,
    pub dialogue: Vec<String>,
    /// Notes from every conditional step on the way down, then the step's own
    pub notes: Vec<String>,
    pub target: Option<StepTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStatus {
    pub name: String,
    /// Accepted item ids, preferred first
    pub ids: Vec<ItemId>,
    pub icon: Option<ItemId>,
    pub quantity: u32,
    pub satisfied: bool,
    pub obtainable_during_quest: bool,
    pub tooltip: Option<String>,
}

impl ItemStatus {
    fn check(item: &ItemRequirement, player: &dyn PlayerState) -> Self {
        Self {
            name: item.name.clone(),
            ids: item.ids.clone(),
            icon: item.icon(),
            quantity: item.quantity,
            satisfied: item.is_satisfied(player),
            obtainable_during_quest: item.obtainable_during_quest,
            tooltip: item.tooltip.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelStepView {
    pub text: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub header: String,
    pub steps: Vec<PanelStepView>,
    pub items: Vec<ItemStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guidance {
    pub quest_id: String,
    pub quest_name: String,
    pub stage: u32,
    /// `None` when the stage is unknown to this quest
    pub active_step: Option<ActiveStep>,
    pub panels: Vec<PanelView>,
    pub required_items: Vec<ItemStatus>,
    pub recommended_items: Vec<ItemStatus>,
}

fn target_of(step: &QuestStep) -> Option<StepTarget> {
    match &step.kind {
        StepKind::Npc { npc, location } => Some(StepTarget::Npc {
            npc: *npc,
            location: *location,
        }),
        StepKind::Object { object, location } => Some(StepTarget::Object {
            object: *object,
            location: *location,
        }),
        StepKind::Tile { location } => Some(StepTarget::Tile {
            location: *location,
        }),
        StepKind::Conditional(_) => None,
    }
}

impl QuestDefinition {
    /// Build the panel contents for `stage` against the current player state.
    pub fn guidance(&self, stage: u32, player: &dyn PlayerState) -> Guidance {
        let steps = self.steps();
        let path = self
            .stage_root(stage)
            .map(|root| steps.resolve_path(root, player))
            .unwrap_or_default();
        let active = path.last().copied();

        let active_step = active.map(|id| {
            let step = steps.get(id);
            ActiveStep {
                key: step.key.clone(),
                text: step.text.clone(),
                dialogue: step.dialogue.clone(),
                notes: path
                    .iter()
                    .flat_map(|id| steps.get(*id).extra_text.iter().cloned())
                    .collect(),
                target: target_of(step),
            }
        });

        let panels = self
            .panels()
            .iter()
            .map(|panel| PanelView {
                header: panel.header.clone(),
                steps: panel
                    .steps
                    .iter()
                    .map(|id| PanelStepView {
                        text: steps.get(*id).text.clone(),
                        active: Some(*id) == active,
                    })
                    .collect(),
                items: panel.items.iter().map(|i| ItemStatus::check(i, player)).collect(),
            })
            .collect();

        Guidance {
            quest_id: self.id.clone(),
            quest_name: self.name.clone(),
            stage,
            active_step,
            panels,
            required_items: self
                .item_requirements()
                .iter()
                .map(|i| ItemStatus::check(i, player))
                .collect(),
            recommended_items: self
                .recommended_items()
                .iter()
                .map(|i| ItemStatus::check(i, player))
                .collect(),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, title: &str, items: &[ItemStatus]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}:", title)?;
    for item in items {
        let mark = if item.satisfied { "x" } else { " " };
        if item.quantity > 1 {
            writeln!(f, "  [{}] {} x{}", mark, item.name, item.quantity)?;
        } else {
            writeln!(f, "  [{}] {}", mark, item.name)?;
        }
    }
    Ok(())
}

impl fmt::Display for Guidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (stage {})", self.quest_name, self.stage)?;

        match &self.active_step {
            Some(step) => {
                writeln!(f, "> {}", step.text)?;
                for note in &step.notes {
                    writeln!(f, "  - {}", note)?;
                }
                for (i, option) in step.dialogue.iter().enumerate() {
                    writeln!(f, "  {}. \"{}\"", i + 1, option)?;
                }
            }
            None => writeln!(f, "> No guidance available for this stage")?,
        }

        for panel in &self.panels {
            writeln!(f, "\n{}", panel.header)?;
            for step in &panel.steps {
                let marker = if step.active { ">" } else { " " };
                writeln!(f, " {} {}", marker, step.text)?;
            }
            for item in &panel.items {
                writeln!(f, "   * {}", item.name)?;
            }
        }

        writeln!(f)?;
        write_items(f, "Required items", &self.required_items)?;
        write_items(f, "Recommended items", &self.recommended_items)
    }
}
