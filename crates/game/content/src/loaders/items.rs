//! Item catalogue: stat contributions for equipment and loot slugs.
//!
//! Loot-only items carry no stats; equipment may carry penalties
//! (negative deltas) alongside bonuses.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::Item;
use serde::Deserialize;

use crate::catalog::index_by_slug;
use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Deserialize)]
struct ItemCatalog {
    items: Vec<Item>,
}

pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, Item>> {
        Self::parse(&read_file(path)?)
    }

    /// Items keyed by slug; a repeated slug is rejected.
    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, Item>> {
        let catalog: ItemCatalog = parse_ron(content, "item")?;
        Ok(index_by_slug("item", catalog.items, |item| &item.slug)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentError;

    #[test]
    fn loot_items_default_to_no_stats() {
        let items = ItemLoader::parse(
            r#"(
                items: [
                    (slug: "oak-shield", name: "Oak Shield", stats: (defense: 5, speed: -1)),
                    (slug: "wolf-pelt", name: "Wolf Pelt"),
                ],
            )"#,
        )
        .expect("valid catalog");

        let shield = &items["oak-shield"];
        assert_eq!(shield.stats.defense, 5);
        assert_eq!(shield.stats.speed, -1);
        assert_eq!(items["wolf-pelt"].stats, game_core::StatDelta::ZERO);
    }

    #[test]
    fn repeated_slug_is_rejected() {
        let err = ItemLoader::parse(
            r#"(items: [(slug: "pelt", name: "A"), (slug: "pelt", name: "B")])"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::DuplicateSlug { kind: "item", .. })
        ));
    }
}
