//! Content loaders for reading game data from files.
//!
//! Each loader parses one RON/TOML catalogue. Catalogues that reference
//! other catalogues parse into `*Spec` types first; [`ContentFactory`]
//! resolves them into `game-core` types.

pub mod abilities;
pub mod config;
pub mod enemies;
pub mod factory;
pub mod heroes;
pub mod items;
pub mod missions;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use enemies::{EnemyLoader, EnemySpec};
pub use factory::ContentFactory;
pub use heroes::{HeroLoader, HeroSpec};
pub use items::ItemLoader;
pub use missions::{MissionLoader, MissionSpec};

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses one RON catalogue; `kind` names it in the error message.
pub(crate) fn parse_ron<T: DeserializeOwned>(content: &str, kind: &str) -> LoadResult<T> {
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} catalog RON: {}", kind, e))
}
