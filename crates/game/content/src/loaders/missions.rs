//! Mission catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{EnemyTemplate, LootTable, Mission, MissionEnemy};
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionEnemySpec {
    pub enemy: String,
    pub quantity: u32,
}

/// Mission as written in `missions.ron`: enemies are slugs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub difficulty: u32,
    #[serde(default)]
    pub base_experience: u64,
    #[serde(default)]
    pub base_gold: u64,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub loot_table: LootTable,
    pub enemies: Vec<MissionEnemySpec>,
}

impl MissionSpec {
    pub fn resolve(
        &self,
        enemies: &BTreeMap<String, EnemyTemplate>,
    ) -> Result<Mission, ContentError> {
        let groups = self
            .enemies
            .iter()
            .map(|group| {
                let template =
                    enemies
                        .get(&group.enemy)
                        .ok_or_else(|| ContentError::UnknownEnemy {
                            mission: self.id.clone(),
                            slug: group.enemy.clone(),
                        })?;
                Ok(MissionEnemy {
                    template: template.clone(),
                    quantity: group.quantity,
                })
            })
            .collect::<Result<Vec<_>, ContentError>>()?;

        Ok(Mission {
            id: self.id.clone(),
            name: self.name.clone(),
            difficulty: self.difficulty,
            base_experience: self.base_experience,
            base_gold: self.base_gold,
            duration_minutes: self.duration_minutes,
            loot_table: self.loot_table.clone(),
            enemies: groups,
        })
    }
}

/// Mission catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionCatalog {
    pub missions: Vec<MissionSpec>,
}

pub struct MissionLoader;

impl MissionLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<MissionSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<MissionSpec>> {
        let catalog: MissionCatalog = parse_ron(content, "mission")?;

        Ok(catalog.missions)
    }
}
