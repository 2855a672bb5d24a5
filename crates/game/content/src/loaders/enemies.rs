//! Enemy template loader.
//!
//! Enemies reference abilities by slug; [`EnemySpec::resolve`] swaps the
//! slugs for definitions from the ability catalogue.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{AbilityDefinition, EnemyAbility, EnemyTemplate, StatBlock};
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::loaders::{LoadResult, parse_ron, read_file};

/// One ability entry of an enemy, by slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyAbilitySpec {
    pub ability: String,
    #[serde(default)]
    pub priority: u32,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub slug: String,
    pub name: String,
    pub base_stats: StatBlock,
    #[serde(default)]
    pub abilities: Vec<EnemyAbilitySpec>,
}

impl EnemySpec {
    pub fn resolve(
        &self,
        abilities: &BTreeMap<String, AbilityDefinition>,
    ) -> Result<EnemyTemplate, ContentError> {
        let resolved = self
            .abilities
            .iter()
            .map(|entry| {
                let ability = abilities.get(&entry.ability).ok_or_else(|| {
                    ContentError::UnknownAbility {
                        owner: format!("enemy {}", self.slug),
                        slug: entry.ability.clone(),
                    }
                })?;
                Ok(EnemyAbility {
                    ability: ability.clone(),
                    priority: entry.priority,
                    weight: entry.weight,
                })
            })
            .collect::<Result<Vec<_>, ContentError>>()?;

        Ok(EnemyTemplate {
            slug: self.slug.clone(),
            name: self.name.clone(),
            base_stats: self.base_stats,
            abilities: resolved,
        })
    }
}

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemySpec>,
}

pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemySpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemySpec>> {
        let catalog: EnemyCatalog = parse_ron(content, "enemy")?;

        Ok(catalog.enemies)
    }
}
