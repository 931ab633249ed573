//! Item requirement descriptors.

use serde::Serialize;

use crate::error::{QuestError, QuestResult};
use crate::ids::ItemId;
use crate::player::PlayerState;

/// An item the player should bring, with acceptable substitutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRequirement {
    pub name: String,
    /// Acceptable items, preferred first. Empty for display-only entries.
    pub ids: Vec<ItemId>,
    pub quantity: u32,
    pub obtainable_during_quest: bool,
    pub tooltip: Option<String>,
    /// Icon shown instead of the first id's sprite
    pub display_icon: Option<ItemId>,
}

impl ItemRequirement {
    pub fn new(name: &str, ids: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            name: name.to_string(),
            ids: ids.into_iter().collect(),
            quantity: 1,
            obtainable_during_quest: false,
            tooltip: None,
            display_icon: None,
        }
    }

    pub fn single(name: &str, id: ItemId) -> Self {
        Self::new(name, [id])
    }

    /// A checklist entry with no concrete item behind it ("Combat gear").
    pub fn display_only(name: &str) -> Self {
        Self::new(name, [])
    }

    pub fn with_quantity(mut self, quantity: u32) -> QuestResult<Self> {
        if quantity == 0 {
            return Err(QuestError::InvalidQuantity { name: self.name });
        }
        self.quantity = quantity;
        Ok(self)
    }

    pub fn with_tooltip(mut self, tooltip: &str) -> Self {
        self.tooltip = Some(tooltip.to_string());
        self
    }

    pub fn with_alternates(mut self, alternates: impl IntoIterator<Item = ItemId>) -> Self {
        self.ids.extend(alternates);
        self
    }

    pub fn obtainable_during_quest(mut self) -> Self {
        self.obtainable_during_quest = true;
        self
    }

    pub fn with_display_icon(mut self, icon: ItemId) -> Self {
        self.display_icon = Some(icon);
        self
    }

    pub fn preferred_id(&self) -> Option<ItemId> {
        self.ids.first().copied()
    }

    /// Icon the panel should draw for this entry.
    pub fn icon(&self) -> Option<ItemId> {
        self.display_icon.or_else(|| self.preferred_id())
    }

    /// True when the player holds enough of any mix of the candidate items.
    pub fn is_satisfied(&self, player: &dyn PlayerState) -> bool {
        let held = self
            .ids
            .iter()
            .map(|id| player.item_count(*id))
            .fold(0u32, u32::saturating_add);
        !self.ids.is_empty() && held >= self.quantity
    }
}
