//! Hero preset loader.
//!
//! Heroes are starting characters: a profile plus a loadout whose abilities
//! and equipment reference the ability and item catalogues by slug.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{
    AbilityDefinition, CharacterProfile, EquipmentSlot, EquippedItem, Item, Loadout,
    LoadoutAbility, StatBlock, StatCoefficients,
};
use serde::{Deserialize, Serialize};

use crate::catalog::Hero;
use crate::error::ContentError;
use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutAbilitySpec {
    pub slot: u32,
    #[serde(default)]
    pub priority: u32,
    pub ability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSpec {
    pub slot: EquipmentSlot,
    pub item: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadoutSpec {
    pub abilities: Vec<LoadoutAbilitySpec>,
    pub equipment: Vec<EquipmentSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSpec {
    pub id: String,
    pub name: String,
    pub base_stats: StatBlock,
    #[serde(default)]
    pub growth: StatCoefficients,
    #[serde(default = "starting_level")]
    pub level: u32,
    #[serde(default)]
    pub loadout: LoadoutSpec,
}

fn starting_level() -> u32 {
    1
}

impl HeroSpec {
    pub fn resolve(
        &self,
        abilities: &BTreeMap<String, AbilityDefinition>,
        items: &BTreeMap<String, Item>,
    ) -> Result<Hero, ContentError> {
        let owner = || format!("hero {}", self.id);

        let loadout_abilities = self
            .loadout
            .abilities
            .iter()
            .map(|entry| {
                let ability = abilities.get(&entry.ability).ok_or_else(|| {
                    ContentError::UnknownAbility {
                        owner: owner(),
                        slug: entry.ability.clone(),
                    }
                })?;
                Ok(LoadoutAbility {
                    slot: entry.slot,
                    priority: entry.priority,
                    ability: ability.clone(),
                })
            })
            .collect::<Result<Vec<_>, ContentError>>()?;

        let equipment = self
            .loadout
            .equipment
            .iter()
            .map(|entry| {
                let item = items
                    .get(&entry.item)
                    .ok_or_else(|| ContentError::UnknownItem {
                        owner: owner(),
                        slug: entry.item.clone(),
                    })?;
                Ok(EquippedItem {
                    slot: entry.slot,
                    item: item.clone(),
                })
            })
            .collect::<Result<Vec<_>, ContentError>>()?;

        let profile = CharacterProfile::new(&self.id, &self.name, self.base_stats)
            .with_growth(self.growth)
            .with_level(self.level);

        Ok(Hero {
            profile,
            loadout: Loadout {
                abilities: loadout_abilities,
                equipment,
            },
        })
    }
}

/// Hero catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroCatalog {
    pub heroes: Vec<HeroSpec>,
}

pub struct HeroLoader;

impl HeroLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<HeroSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<HeroSpec>> {
        let catalog: HeroCatalog = parse_ron(content, "hero")?;

        Ok(catalog.heroes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{AbilityFormula, StatDelta, StrikeFormula};

    const ARIA: &str = r#"(
        heroes: [
            (
                id: "aria",
                name: "Aria",
                base_stats: (health: 120, attack: 18, defense: 10, speed: 12, magic: 6),
                growth: (health: 12.0, attack: 2.0),
                level: 3,
                loadout: (
                    abilities: [(slot: 0, ability: "slash")],
                    equipment: [(slot: weapon, item: "iron-sword")],
                ),
            ),
        ],
    )"#;

    fn catalogues() -> (BTreeMap<String, AbilityDefinition>, BTreeMap<String, Item>) {
        let slash = AbilityDefinition::new(
            "slash",
            "Slash",
            AbilityFormula::Physical(StrikeFormula::default()),
        );
        let sword = Item {
            slug: "iron-sword".into(),
            name: "Iron Sword".into(),
            stats: StatDelta {
                attack: 5,
                ..StatDelta::ZERO
            },
        };
        (
            BTreeMap::from([("slash".to_string(), slash)]),
            BTreeMap::from([("iron-sword".to_string(), sword)]),
        )
    }

    #[test]
    fn resolves_loadout_references() {
        let (abilities, items) = catalogues();
        let hero = HeroLoader::parse(ARIA).unwrap()[0]
            .resolve(&abilities, &items)
            .unwrap();

        assert_eq!(hero.profile.level, 3);
        assert_eq!(hero.loadout.abilities[0].ability.name, "Slash");
        assert_eq!(hero.loadout.equipment[0].slot, EquipmentSlot::Weapon);
        assert_eq!(hero.loadout.equipment[0].item.stats.attack, 5);
    }

    #[test]
    fn unknown_item_is_reported() {
        let (abilities, _) = catalogues();
        let result = HeroLoader::parse(ARIA).unwrap()[0].resolve(&abilities, &BTreeMap::new());

        assert_eq!(
            result,
            Err(ContentError::UnknownItem {
                owner: "hero aria".into(),
                slug: "iron-sword".into(),
            })
        );
    }
}
