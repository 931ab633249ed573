//! Game identifiers used by quest content.
//!
//! Only the ids our quests reference are named here. Values match the
//! game cache so they can be compared against what the host reports.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NpcId(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub i32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item #{}", self.0)
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "npc #{}", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object #{}", self.0)
    }
}

pub mod item {
    use super::ItemId;

    pub const CANDLE_LIT: ItemId = ItemId(33);
    pub const FISHING_ROD: ItemId = ItemId(307);
    pub const GOBLIN_MAIL: ItemId = ItemId(288);
    pub const TINDERBOX: ItemId = ItemId(590);
    pub const LIT_TORCH: ItemId = ItemId(594);
    pub const DRAMEN_STAFF: ItemId = ItemId(772);
    pub const COINS: ItemId = ItemId(995);
    pub const AMULET_OF_GLORY_1: ItemId = ItemId(1706);
    pub const AMULET_OF_GLORY_2: ItemId = ItemId(1708);
    pub const AMULET_OF_GLORY_3: ItemId = ItemId(1710);
    pub const AMULET_OF_GLORY_4: ItemId = ItemId(1712);
    pub const YELLOW_DYE: ItemId = ItemId(1765);
    pub const BLUE_DYE: ItemId = ItemId(1767);
    pub const ORANGE_DYE: ItemId = ItemId(1769);
    pub const PURPLE_DYE: ItemId = ItemId(1773);
    pub const TOADFLAX_POTION_UNF: ItemId = ItemId(3002);
    pub const RAW_SLIMY_EEL: ItemId = ItemId(3379);
    pub const OIL_LANTERN_LIT: ItemId = ItemId(4539);
    pub const BULLSEYE_LANTERN_LIT: ItemId = ItemId(4550);
    pub const SALVE_AMULET: ItemId = ItemId(4081);
    pub const LUMBRIDGE_TELEPORT: ItemId = ItemId(8008);
    pub const LUNAR_STAFF: ItemId = ItemId(9084);
    pub const SALVE_AMULET_E: ItemId = ItemId(10588);
    pub const DORGESHKAAN_SPHERE: ItemId = ItemId(10972);
    pub const SKILLS_NECKLACE_1: ItemId = ItemId(11111);
    pub const SKILLS_NECKLACE_2: ItemId = ItemId(11109);
    pub const SKILLS_NECKLACE_3: ItemId = ItemId(11107);
    pub const SKILLS_NECKLACE_4: ItemId = ItemId(11105);
    pub const COMBAT_BRACELET_1: ItemId = ItemId(11124);
    pub const COMBAT_BRACELET_2: ItemId = ItemId(11122);
    pub const COMBAT_BRACELET_3: ItemId = ItemId(11120);
    pub const COMBAT_BRACELET_4: ItemId = ItemId(11118);
    pub const SKILLS_NECKLACE_5: ItemId = ItemId(11970);
    pub const SKILLS_NECKLACE_6: ItemId = ItemId(11968);
    pub const COMBAT_BRACELET_5: ItemId = ItemId(11974);
    pub const COMBAT_BRACELET_6: ItemId = ItemId(11972);
    pub const AMULET_OF_GLORY_5: ItemId = ItemId(11976);
    pub const AMULET_OF_GLORY_6: ItemId = ItemId(11978);
    pub const EXPLORERS_RING_3: ItemId = ItemId(13127);
    pub const EXPLORERS_RING_4: ItemId = ItemId(13128);
    pub const BLACK_DYE: ItemId = ItemId(25538);

    /// Bank-slot icon used for "combat gear" style placeholders.
    pub const ARMOUR_ICON: ItemId = ItemId(1127);
}

pub mod npc {
    use super::NpcId;

    pub const GRUBFOOT_11255: NpcId = NpcId(11255);
    pub const ZANIK_11260: NpcId = NpcId(11260);
    pub const GOBLIN_GUARD_11314: NpcId = NpcId(11314);
}

pub mod object {
    use super::ObjectId;

    pub const DOOR_6919: ObjectId = ObjectId(6919);
}

/// Named groups of interchangeable items, best first.
pub mod collections {
    use super::{ItemId, item};

    pub fn light_sources() -> Vec<ItemId> {
        vec![
            item::BULLSEYE_LANTERN_LIT,
            item::OIL_LANTERN_LIT,
            item::LIT_TORCH,
            item::CANDLE_LIT,
        ]
    }

    pub fn fairy_staff() -> Vec<ItemId> {
        vec![item::DRAMEN_STAFF, item::LUNAR_STAFF]
    }

    pub fn skills_necklaces() -> Vec<ItemId> {
        vec![
            item::SKILLS_NECKLACE_6,
            item::SKILLS_NECKLACE_5,
            item::SKILLS_NECKLACE_4,
            item::SKILLS_NECKLACE_3,
            item::SKILLS_NECKLACE_2,
            item::SKILLS_NECKLACE_1,
        ]
    }

    pub fn combat_bracelets() -> Vec<ItemId> {
        vec![
            item::COMBAT_BRACELET_6,
            item::COMBAT_BRACELET_5,
            item::COMBAT_BRACELET_4,
            item::COMBAT_BRACELET_3,
            item::COMBAT_BRACELET_2,
            item::COMBAT_BRACELET_1,
        ]
    }

    pub fn amulets_of_glory() -> Vec<ItemId> {
        vec![
            item::AMULET_OF_GLORY_6,
            item::AMULET_OF_GLORY_5,
            item::AMULET_OF_GLORY_4,
            item::AMULET_OF_GLORY_3,
            item::AMULET_OF_GLORY_2,
            item::AMULET_OF_GLORY_1,
        ]
    }
}
