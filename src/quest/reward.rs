//! Quest reward records. Display only; the host grants the actual rewards.

use serde::Serialize;

use crate::skills::Skill;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestPointReward {
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExperienceReward {
    pub skill: Skill,
    pub amount: u32,
}

impl ExperienceReward {
    pub fn new(skill: Skill, amount: u32) -> Self {
        Self { skill, amount }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockReward {
    pub description: String,
}

impl UnlockReward {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rewards {
    pub quest_points: Option<QuestPointReward>,
    pub experience: Vec<ExperienceReward>,
    pub unlocks: Vec<UnlockReward>,
}

impl Rewards {
    pub fn is_empty(&self) -> bool {
        self.quest_points.is_none() && self.experience.is_empty() && self.unlocks.is_empty()
    }
}
