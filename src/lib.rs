//! Quest guidance engine.
//!
//! Quest content (items, zones, steps, rewards) is declared once per quest.
//! Each tick the host passes its player state and current stage, and gets
//! back the step to show and the panel contents around it.

pub mod config;
pub mod error;
pub mod ids;
pub mod player;
pub mod quest;
pub mod quests;
pub mod skills;
pub mod world;

pub use error::{QuestError, QuestResult};
pub use player::{PlayerSnapshot, PlayerState, QuestState};
pub use quest::{Guidance, QuestBuilder, QuestDefinition, QuestRegistry};
