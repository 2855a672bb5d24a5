//! Per-battle ability slots.
//!
//! A slot pairs an immutable [`AbilityDefinition`] with the loadout slot
//! index, its selection priority and a mutable cooldown counter.

use crate::ability::AbilityDefinition;
use crate::env::CombatRng;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySlotState {
    pub ability: AbilityDefinition,
    pub slot: u32,
    /// Lower is preferred.
    pub priority: u32,
    /// Relative pick weight among ready slots sharing the best priority.
    pub weight: u32,
    cooldown_remaining: u32,
}

impl AbilitySlotState {
    pub fn new(ability: AbilityDefinition, slot: u32, priority: u32) -> Self {
        Self {
            ability,
            slot,
            priority,
            weight: 1,
            cooldown_remaining: 0,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    /// Puts the ability on its declared cooldown.
    pub fn trigger(&mut self) {
        self.cooldown_remaining = self.ability.cooldown_turns;
    }

    /// Counts the cooldown down by one, never below zero.
    pub fn tick(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }
}

/// Chooses which slot acts this turn.
///
/// Among ready slots the lowest priority wins. A tie consumes one draw and
/// picks proportionally to `weight` (uniformly when all weights are equal or
/// all are zero). With nothing ready, the globally lowest priority slot acts
/// anyway, first in slot order on ties, without consuming a draw.
pub fn select_slot(
    slots: &[AbilitySlotState],
    rng: &mut (impl CombatRng + ?Sized),
) -> Option<usize> {
    let best_ready = slots
        .iter()
        .filter(|slot| slot.is_ready())
        .map(|slot| slot.priority)
        .min();

    let Some(priority) = best_ready else {
        return slots
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| slot.priority)
            .map(|(index, _)| index);
    };

    let candidates: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_ready() && slot.priority == priority)
        .map(|(index, _)| index)
        .collect();

    if candidates.len() == 1 {
        return candidates.first().copied();
    }

    let total_weight: u64 = candidates
        .iter()
        .map(|&index| u64::from(slots[index].weight))
        .sum();
    if total_weight == 0 {
        return rng
            .pick_index(candidates.len())
            .and_then(|pick| candidates.get(pick).copied());
    }

    let roll = rng.next_f64() * total_weight as f64;
    let mut cumulative = 0.0;
    for &index in &candidates {
        cumulative += f64::from(slots[index].weight);
        if roll < cumulative {
            return Some(index);
        }
    }
    candidates.last().copied()
}
