//! Data-driven combat content and loaders.
//!
//! This crate houses the catalogues the combat engine consumes and loads them
//! from RON/TOML data files:
//! - Ability definitions (`abilities.ron`)
//! - Item stat contributions (`items.ron`)
//! - Enemy templates referencing abilities (`enemies.ron`)
//! - Missions referencing enemies (`missions.ron`)
//! - Hero presets with loadouts (`heroes.ron`)
//! - Combat configuration (`config.toml`)
//!
//! Catalogue files reference each other by slug; the [`ContentFactory`]
//! resolves every reference into `game-core` types and rejects dangling ones.

pub mod catalog;
pub mod error;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{ContentCatalog, Hero};
pub use error::ContentError;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ConfigLoader, ContentFactory, EnemyLoader, EnemySpec, HeroLoader, HeroSpec,
    ItemLoader, LoadResult, MissionLoader, MissionSpec,
};
