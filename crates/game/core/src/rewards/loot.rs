//! Loot rolling.

use crate::env::{CombatRng, LootEntry};

/// One awarded item stack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDrop {
    pub item_slug: String,
    pub quantity: u32,
}

/// Accumulates drops, merging quantities per slug in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LootBag {
    drops: Vec<LootDrop>,
}

impl LootBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item_slug: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.drops.iter_mut().find(|drop| drop.item_slug == item_slug) {
            Some(drop) => drop.quantity = drop.quantity.saturating_add(quantity),
            None => self.drops.push(LootDrop {
                item_slug: item_slug.to_string(),
                quantity,
            }),
        }
    }

    /// Rolls every entry once, each against `chance × chance_scale`.
    ///
    /// Every entry consumes exactly one draw.
    pub fn roll(
        &mut self,
        entries: &[LootEntry],
        chance_scale: f64,
        rng: &mut (impl CombatRng + ?Sized),
    ) {
        for entry in entries {
            if rng.chance(entry.chance * chance_scale) {
                self.add(&entry.item_slug, entry.quantity);
            }
        }
    }

    pub fn into_drops(self) -> Vec<LootDrop> {
        self.drops
    }
}
