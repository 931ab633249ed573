//! Skills following RuneScape-style mechanics.
//!
//! The quest engine only reads levels; XP tracking belongs to the host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum skill level
pub const MAX_LEVEL: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecraft,
    Hunter,
    Construction,
}

impl Skill {
    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Attack => "attack",
            Skill::Defence => "defence",
            Skill::Strength => "strength",
            Skill::Hitpoints => "hitpoints",
            Skill::Ranged => "ranged",
            Skill::Prayer => "prayer",
            Skill::Magic => "magic",
            Skill::Cooking => "cooking",
            Skill::Woodcutting => "woodcutting",
            Skill::Fletching => "fletching",
            Skill::Fishing => "fishing",
            Skill::Firemaking => "firemaking",
            Skill::Crafting => "crafting",
            Skill::Smithing => "smithing",
            Skill::Mining => "mining",
            Skill::Herblore => "herblore",
            Skill::Agility => "agility",
            Skill::Thieving => "thieving",
            Skill::Slayer => "slayer",
            Skill::Farming => "farming",
            Skill::Runecraft => "runecraft",
            Skill::Hunter => "hunter",
            Skill::Construction => "construction",
        }
    }

    /// Capitalized name for display ("Agility").
    pub fn display_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Calculate combat level from the seven combat skills.
///
/// `level` is queried per skill; any missing skill makes the result `None`.
pub fn combat_level(level: impl Fn(Skill) -> Option<u32>) -> Option<u32> {
    let attack = level(Skill::Attack)? as f64;
    let strength = level(Skill::Strength)? as f64;
    let defence = level(Skill::Defence)? as f64;
    let hitpoints = level(Skill::Hitpoints)? as f64;
    let prayer = level(Skill::Prayer)? as f64;
    let ranged = level(Skill::Ranged)? as f64;
    let magic = level(Skill::Magic)? as f64;

    let base = 0.25 * (defence + hitpoints + (prayer / 2.0).floor());
    let melee = 0.325 * (attack + strength);
    let range = 0.325 * (ranged * 1.5).floor();
    let mage = 0.325 * (magic * 1.5).floor();

    Some((base + melee.max(range).max(mage)).floor() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(Skill::Thieving.display_name(), "Thieving");
        assert_eq!(Skill::Fishing.to_string(), "Fishing");
    }

    #[test]
    fn test_combat_level_formula() {
        // Fresh account: 1s everywhere, 10 hitpoints
        let fresh = |s: Skill| Some(if s == Skill::Hitpoints { 10 } else { 1 });
        assert_eq!(combat_level(fresh), Some(3));

        let maxed = |_: Skill| Some(MAX_LEVEL);
        assert_eq!(combat_level(maxed), Some(126));
    }

    #[test]
    fn test_combat_level_missing_skill() {
        let partial = |s: Skill| (s != Skill::Prayer).then_some(50);
        assert_eq!(combat_level(partial), None);
    }
}
