//! Ability catalog loader.

use std::path::Path;

use game_core::AbilityDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityDefinition>,
}

/// Loader for ability definitions from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load ability definitions from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing AbilityCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<AbilityDefinition>> {
        let catalog: AbilityCatalog = parse_ron(content, "ability")?;

        Ok(catalog.abilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{AbilityFormula, StatusEffectKind, TargetKind};

    #[test]
    fn parses_strikes_with_statuses() {
        let abilities = AbilityLoader::parse(
            r#"#![enable(implicit_some)]
            (
                abilities: [
                    (
                        slug: "fireball",
                        name: "Fireball",
                        school: "pyromancy",
                        base_power: 18,
                        cooldown_turns: 2,
                        formula: Magical((
                            scaling: (magic: 1.2),
                            variance: 0.2,
                            status: (
                                name: "burn",
                                duration: 3,
                                chance: 0.5,
                                debuff: true,
                                effect: DamagePerTurn(4),
                            ),
                        )),
                    ),
                    (
                        slug: "cleave",
                        name: "Cleave",
                        target: Area,
                        base_power: 8,
                        formula: Physical((scaling: (attack: 0.6))),
                    ),
                ],
            )"#,
        )
        .expect("valid catalog");

        assert_eq!(abilities.len(), 2);
        let AbilityFormula::Magical(strike) = &abilities[0].formula else {
            panic!("fireball should be magical");
        };
        assert_eq!(strike.variance, Some(0.2));
        let burn = strike.status.as_ref().expect("burn attached");
        assert!(burn.debuff);
        assert_eq!(burn.effect, StatusEffectKind::DamagePerTurn(4));

        assert_eq!(abilities[1].target, TargetKind::Area);
        assert_eq!(abilities[1].cooldown_turns, 0);
    }

    #[test]
    fn reports_malformed_catalogs() {
        let err = AbilityLoader::parse("(abilities: [(slug: 1)])").unwrap_err();
        assert!(err.to_string().contains("ability catalog"));
    }
}
