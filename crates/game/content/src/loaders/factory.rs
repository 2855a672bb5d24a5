//! Content factory for building resolved catalogues from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use game_core::{AbilityDefinition, CombatConfig, EnemyTemplate, Item, Mission};

use crate::catalog::{ContentCatalog, Hero, index_by_slug};
use crate::loaders::{
    AbilityLoader, ConfigLoader, EnemyLoader, HeroLoader, ItemLoader, LoadResult, MissionLoader,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── items.ron
/// ├── enemies.ron
/// ├── missions.ron
/// └── heroes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load ability definitions from `abilities.ron`, keyed by slug.
    pub fn load_abilities(&self) -> LoadResult<BTreeMap<String, AbilityDefinition>> {
        let path = self.data_dir.join("abilities.ron");
        let abilities = AbilityLoader::load(&path)?;
        Ok(index_by_slug("ability", abilities, |a| &a.slug)?)
    }

    /// Load item catalog from `items.ron`, keyed by slug.
    pub fn load_items(&self) -> LoadResult<BTreeMap<String, Item>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load enemy templates from `enemies.ron`, resolving ability slugs.
    pub fn load_enemies(
        &self,
        abilities: &BTreeMap<String, AbilityDefinition>,
    ) -> LoadResult<BTreeMap<String, EnemyTemplate>> {
        let path = self.data_dir.join("enemies.ron");
        let enemies = EnemyLoader::load(&path)?
            .iter()
            .map(|spec| spec.resolve(abilities))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(index_by_slug("enemy", enemies, |e| &e.slug)?)
    }

    /// Load missions from `missions.ron`, resolving enemy slugs.
    pub fn load_missions(
        &self,
        enemies: &BTreeMap<String, EnemyTemplate>,
    ) -> LoadResult<BTreeMap<String, Mission>> {
        let path = self.data_dir.join("missions.ron");
        let missions = MissionLoader::load(&path)?
            .iter()
            .map(|spec| spec.resolve(enemies))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(index_by_slug("mission", missions, |m| &m.id)?)
    }

    /// Load hero presets from `heroes.ron`, resolving loadout slugs.
    pub fn load_heroes(
        &self,
        abilities: &BTreeMap<String, AbilityDefinition>,
        items: &BTreeMap<String, Item>,
    ) -> LoadResult<BTreeMap<String, Hero>> {
        let path = self.data_dir.join("heroes.ron");
        let heroes = HeroLoader::load(&path)?
            .iter()
            .map(|spec| spec.resolve(abilities, items))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(index_by_slug("hero", heroes, |h| &h.profile.id)?)
    }

    /// Loads and cross-references every catalogue in the directory.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let config = self.load_config()?;
        let abilities = self.load_abilities()?;
        let items = self.load_items()?;
        let enemies = self.load_enemies(&abilities)?;
        let missions = self.load_missions(&enemies)?;
        let heroes = self.load_heroes(&abilities, &items)?;

        Ok(ContentCatalog {
            config,
            abilities,
            items,
            enemies,
            missions,
            heroes,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
