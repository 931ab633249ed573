//! Quests compiled into the crate.

use crate::error::QuestResult;
use crate::quest::QuestDefinition;

pub mod land_of_the_goblins;

pub const BUILTIN: &[fn() -> QuestResult<QuestDefinition>] = &[land_of_the_goblins::build];
