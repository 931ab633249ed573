//! Quest System Module
//!
//! Requirement predicates, step descriptors with a conditional router, and
//! the quest definitions that tie them together for the host's guidance
//! panel. Definitions are built in Rust or loaded from TOML files.

pub mod definition;
pub mod guidance;
pub mod item;
pub mod loader;
pub mod panel;
pub mod registry;
pub mod requirement;
pub mod reward;
pub mod step;

pub use definition::{QuestBuilder, QuestDefinition};
pub use guidance::{ActiveStep, Guidance, ItemStatus, PanelStepView, PanelView, StepTarget};
pub use item::ItemRequirement;
pub use loader::{RawQuestFile, load_quest_file, parse_quest};
pub use panel::Panel;
pub use registry::QuestRegistry;
pub use requirement::Requirement;
pub use reward::{ExperienceReward, QuestPointReward, Rewards, UnlockReward};
pub use step::{Branch, ConditionalStep, QuestStep, StepId, StepKind, StepTree};
