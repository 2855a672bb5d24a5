//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during play:
//! - Characters (experience, gold, level, inventory)
//! - Combat encounter records
//! - Idle sessions
//!
//! Missions are static content but live behind a repository so services
//! can resolve them by id.

mod error;
mod memory;
mod records;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::{
    InMemoryCharacterRepo, InMemoryEncounterRepo, InMemoryIdleSessionRepo, InMemoryMissionRepo,
};
pub use records::{ClaimOutcome, IdleSession, InventoryStack, RewardApplication};
pub use traits::{
    CharacterRepository, EncounterRepository, IdleSessionRepository, MissionRepository,
};
