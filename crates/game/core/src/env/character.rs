//! Character inputs supplied by the persistence layer.

use crate::ability::AbilityDefinition;
use crate::stats::{StatBlock, StatCoefficients, StatDelta, merge_stats, scale_stats_for_level};

/// Persisted character record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterProfile {
    pub id: String,
    pub name: String,
    pub base_stats: StatBlock,
    /// Per-level stat growth applied on top of `base_stats`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub growth: StatCoefficients,
    #[cfg_attr(feature = "serde", serde(default = "CharacterProfile::starting_level"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u64,
}

impl CharacterProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_stats: StatBlock) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_stats,
            growth: StatCoefficients::ZERO,
            level: Self::starting_level(),
            experience: 0,
            gold: 0,
        }
    }

    #[must_use]
    pub fn with_growth(mut self, growth: StatCoefficients) -> Self {
        self.growth = growth;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    fn starting_level() -> u32 {
        1
    }

    /// Base stats projected to the current level, before equipment.
    pub fn leveled_stats(&self) -> StatBlock {
        scale_stats_for_level(&self.base_stats, &self.growth, self.level)
    }

    /// Final stats: leveled base merged with every equipped item.
    ///
    /// Equipment may lower any stat except that health never drops below
    /// the leveled base health.
    pub fn combat_stats(&self, loadout: &Loadout) -> StatBlock {
        let base = self.leveled_stats();
        let contributions = core::iter::once(StatDelta::from(base))
            .chain(loadout.equipment.iter().map(|equipped| equipped.item.stats));
        let mut merged = merge_stats(contributions);
        merged.health = merged.health.max(base.health);
        merged
    }
}

/// Equipment slot on a character.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipmentSlot {
    Weapon,
    Offhand,
    Head,
    Chest,
    Legs,
    Feet,
    Accessory,
}

/// An item as far as combat is concerned: its stat contribution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub slug: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: StatDelta,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedItem {
    pub slot: EquipmentSlot,
    pub item: Item,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutAbility {
    pub slot: u32,
    /// Lower is preferred.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: u32,
    pub ability: AbilityDefinition,
}

/// Abilities and equipment a character brings into one battle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Loadout {
    pub abilities: Vec<LoadoutAbility>,
    pub equipment: Vec<EquippedItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(slug: &str, stats: StatDelta) -> EquippedItem {
        EquippedItem {
            slot: EquipmentSlot::Weapon,
            item: Item {
                slug: slug.into(),
                name: slug.into(),
                stats,
            },
        }
    }

    #[test]
    fn equipment_adds_to_base() {
        let hero = CharacterProfile::new("hero", "Hero", StatBlock::new(100, 10, 5, 5, 0));
        let loadout = Loadout {
            abilities: Vec::new(),
            equipment: vec![item(
                "sword",
                StatDelta {
                    attack: 6,
                    speed: -2,
                    ..StatDelta::ZERO
                },
            )],
        };
        assert_eq!(hero.combat_stats(&loadout), StatBlock::new(100, 16, 5, 3, 0));
    }

    #[test]
    fn cursed_gear_cannot_lower_health_below_base() {
        let hero = CharacterProfile::new("hero", "Hero", StatBlock::new(100, 10, 5, 5, 0));
        let loadout = Loadout {
            abilities: Vec::new(),
            equipment: vec![item(
                "cursed-ring",
                StatDelta {
                    health: -40,
                    defense: -9,
                    ..StatDelta::ZERO
                },
            )],
        };
        let stats = hero.combat_stats(&loadout);
        assert_eq!(stats.health, 100);
        assert_eq!(stats.defense, 0);
    }

    #[test]
    fn level_growth_feeds_combat_stats() {
        let hero = CharacterProfile::new("hero", "Hero", StatBlock::new(100, 10, 5, 5, 0))
            .with_growth(StatCoefficients {
                health: 12.0,
                attack: 1.5,
                ..StatCoefficients::ZERO
            })
            .with_level(3);
        assert_eq!(
            hero.combat_stats(&Loadout::default()),
            StatBlock::new(124, 13, 5, 5, 0)
        );
    }

    #[test]
    fn equipment_slots_parse_from_names() {
        assert_eq!("weapon".parse::<EquipmentSlot>().ok(), Some(EquipmentSlot::Weapon));
        assert_eq!(EquipmentSlot::Accessory.to_string(), "accessory");
    }
}
