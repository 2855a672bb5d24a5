//! Resolved content, ready to hand to the engine.

use std::collections::BTreeMap;

use game_core::{AbilityDefinition, CharacterProfile, CombatConfig, EnemyTemplate, Item, Loadout, Mission};

use crate::error::ContentError;

/// A playable character preset with its loadout.
#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    pub profile: CharacterProfile,
    pub loadout: Loadout,
}

/// Every catalogue of a data directory with all slug references resolved.
#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    pub config: CombatConfig,
    pub abilities: BTreeMap<String, AbilityDefinition>,
    pub items: BTreeMap<String, Item>,
    pub enemies: BTreeMap<String, EnemyTemplate>,
    pub missions: BTreeMap<String, Mission>,
    pub heroes: BTreeMap<String, Hero>,
}

impl ContentCatalog {
    pub fn mission(&self, id: &str) -> Result<&Mission, ContentError> {
        self.missions.get(id).ok_or_else(|| ContentError::NotFound {
            kind: "mission",
            slug: id.to_string(),
        })
    }

    pub fn hero(&self, id: &str) -> Result<&Hero, ContentError> {
        self.heroes.get(id).ok_or_else(|| ContentError::NotFound {
            kind: "hero",
            slug: id.to_string(),
        })
    }
}

/// Indexes entries by slug, rejecting duplicates.
pub(crate) fn index_by_slug<T>(
    kind: &'static str,
    entries: Vec<T>,
    slug: impl Fn(&T) -> &str,
) -> Result<BTreeMap<String, T>, ContentError> {
    let mut index = BTreeMap::new();
    for entry in entries {
        let key = slug(&entry).to_string();
        if index.contains_key(&key) {
            return Err(ContentError::DuplicateSlug { kind, slug: key });
        }
        index.insert(key, entry);
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_slugs_are_rejected() {
        let result = index_by_slug("item", vec!["a", "b", "a"], |s| s);
        assert_eq!(
            result,
            Err(ContentError::DuplicateSlug {
                kind: "item",
                slug: "a".into()
            })
        );
    }

    #[test]
    fn missing_entries_are_typed_errors() {
        let catalog = ContentCatalog::default();
        assert!(matches!(
            catalog.mission("nowhere"),
            Err(ContentError::NotFound { kind: "mission", .. })
        ));
    }
}
