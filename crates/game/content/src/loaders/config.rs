//! Combat configuration loader.

use std::path::Path;

use game_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("round_cap = 8\n").unwrap();
        assert_eq!(config.round_cap, 8);
        assert_eq!(
            config.encounter_log_limit,
            CombatConfig::DEFAULT_ENCOUNTER_LOG_LIMIT
        );
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), CombatConfig::default());
    }
}
