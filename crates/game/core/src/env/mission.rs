//! Mission and enemy inputs.

use crate::ability::AbilityDefinition;
use crate::stats::{StatBlock, StatDelta, merge_stats, power_rating};

/// One ability an enemy template can use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAbility {
    pub ability: AbilityDefinition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: u32,
    /// Relative pick weight among equally prioritised ready abilities.
    #[cfg_attr(feature = "serde", serde(default = "EnemyAbility::default_weight"))]
    pub weight: u32,
}

impl EnemyAbility {
    pub fn new(ability: AbilityDefinition, priority: u32) -> Self {
        Self {
            ability,
            priority,
            weight: Self::default_weight(),
        }
    }

    fn default_weight() -> u32 {
        1
    }
}

/// Enemy catalogue entry, instantiated once per mission quantity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub slug: String,
    pub name: String,
    pub base_stats: StatBlock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<EnemyAbility>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissionEnemy {
    pub template: EnemyTemplate,
    pub quantity: u32,
}

/// A possible drop. Every entry rolls independently against `chance`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item_slug: String,
    pub chance: f64,
    #[cfg_attr(feature = "serde", serde(default = "LootEntry::default_quantity"))]
    pub quantity: u32,
}

impl LootEntry {
    pub fn new(item_slug: impl Into<String>, chance: f64, quantity: u32) -> Self {
        Self {
            item_slug: item_slug.into(),
            chance,
            quantity,
        }
    }

    fn default_quantity() -> u32 {
        1
    }
}

/// Loot table of a mission.
///
/// "Guaranteed" entries still roll against their own chance; they are only
/// guaranteed a roll on every victory, while idle claims use `rolls` alone.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LootTable {
    pub guaranteed: Vec<LootEntry>,
    pub rolls: Vec<LootEntry>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mission {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub difficulty: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_experience: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_gold: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_minutes: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot_table: LootTable,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: Vec<MissionEnemy>,
}

impl Mission {
    /// Total number of enemy actors the mission spawns.
    pub fn enemy_count(&self) -> u32 {
        self.enemies
            .iter()
            .fold(0, |total: u32, group| total.saturating_add(group.quantity))
    }

    /// Every enemy's base stats summed, replicas included.
    pub fn enemy_stats(&self) -> StatBlock {
        merge_stats(self.enemies.iter().map(|group| {
            let quantity = i64::from(group.quantity);
            let base = StatDelta::from(group.template.base_stats);
            StatDelta {
                health: base.health.saturating_mul(quantity),
                attack: base.attack.saturating_mul(quantity),
                defense: base.defense.saturating_mul(quantity),
                speed: base.speed.saturating_mul(quantity),
                magic: base.magic.saturating_mul(quantity),
            }
        }))
    }

    /// Power rating of the whole opposing side.
    pub fn power_rating(&self) -> u32 {
        power_rating(&self.enemy_stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mission() -> Mission {
        let goblin = EnemyTemplate {
            slug: "goblin".into(),
            name: "Goblin".into(),
            base_stats: StatBlock::new(40, 6, 2, 5, 0),
            abilities: Vec::new(),
        };
        let shaman = EnemyTemplate {
            slug: "shaman".into(),
            name: "Shaman".into(),
            base_stats: StatBlock::new(30, 2, 1, 4, 8),
            abilities: Vec::new(),
        };
        Mission {
            id: "goblin-camp".into(),
            name: "Goblin Camp".into(),
            difficulty: 2,
            base_experience: 40,
            base_gold: 25,
            duration_minutes: 30,
            loot_table: LootTable::default(),
            enemies: vec![
                MissionEnemy {
                    template: goblin,
                    quantity: 2,
                },
                MissionEnemy {
                    template: shaman,
                    quantity: 1,
                },
            ],
        }
    }

    #[test]
    fn enemy_stats_count_replicas() {
        let mission = mission();
        assert_eq!(mission.enemy_count(), 3);
        assert_eq!(mission.enemy_stats(), StatBlock::new(110, 14, 5, 14, 8));
    }

    #[test]
    fn power_rating_covers_the_whole_side() {
        // 33 + 28 + 9 + 21 + 16.8 = 107.8
        assert_eq!(mission().power_rating(), 108);
    }

    #[test]
    fn huge_groups_saturate() {
        let mut mission = mission();
        for group in &mut mission.enemies {
            group.quantity = u32::MAX;
            group.template.base_stats = StatBlock::new(u32::MAX, u32::MAX, 0, 0, 0);
        }
        assert_eq!(mission.enemy_count(), u32::MAX);
        assert_eq!(mission.enemy_stats().health, u32::MAX);
    }
}
