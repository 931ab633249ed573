//! Requirement predicates over player state.

use crate::player::{PlayerState, QuestState};
use crate::skills::Skill;
use crate::world::Zone;

/// A boolean check against the current player state.
///
/// Evaluation never fails: anything the host cannot report counts as
/// unsatisfied.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// Player stands inside the zone
    Zone(Zone),
    Skill {
        skill: Skill,
        level: u32,
        /// Whether a temporary boost counts toward the level
        boostable: bool,
    },
    Quest {
        quest_id: String,
        quest_name: String,
        state: QuestState,
    },
    CombatLevel(u32),
}

impl Requirement {
    pub fn skill(skill: Skill, level: u32, boostable: bool) -> Self {
        Requirement::Skill {
            skill,
            level,
            boostable,
        }
    }

    pub fn quest_finished(quest_id: &str, quest_name: &str) -> Self {
        Requirement::Quest {
            quest_id: quest_id.to_string(),
            quest_name: quest_name.to_string(),
            state: QuestState::Finished,
        }
    }

    pub fn is_satisfied(&self, player: &dyn PlayerState) -> bool {
        match self {
            Requirement::Zone(zone) => player
                .location()
                .is_some_and(|location| zone.contains(location)),
            Requirement::Skill {
                skill,
                level,
                boostable,
            } => {
                let real = player.skill_level(*skill);
                let current = if *boostable {
                    // a drained skill still counts at its real level
                    match (real, player.boosted_skill_level(*skill)) {
                        (Some(real), Some(boosted)) => Some(real.max(boosted)),
                        (real, boosted) => real.or(boosted),
                    }
                } else {
                    real
                };
                current.is_some_and(|current| current >= *level)
            }
            Requirement::Quest {
                quest_id, state, ..
            } => player.quest_state(quest_id) == Some(*state),
            Requirement::CombatLevel(level) => {
                player.combat_level().is_some_and(|current| current >= *level)
            }
        }
    }

    /// Text shown in the requirements section of the panel.
    pub fn display_text(&self) -> String {
        match self {
            Requirement::Zone(zone) => format!("Be inside {}", zone),
            Requirement::Skill {
                skill,
                level,
                boostable,
            } => {
                if *boostable {
                    format!("{} {} (boostable)", level, skill)
                } else {
                    format!("{} {}", level, skill)
                }
            }
            Requirement::Quest {
                quest_name, state, ..
            } => match state {
                QuestState::Finished => format!("Completed {}", quest_name),
                QuestState::InProgress => format!("Started {}", quest_name),
                QuestState::NotStarted => format!("Not started {}", quest_name),
            },
            Requirement::CombatLevel(level) => format!("Combat level {}", level),
        }
    }
}
