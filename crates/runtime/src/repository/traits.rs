//! Repository contracts for mutable runtime data.

use chrono::{DateTime, Utc};

use game_core::{CharacterProfile, CombatEncounter, Loadout, Mission, RewardResult};

use super::error::Result;
use super::records::{ClaimOutcome, IdleSession, InventoryStack, RewardApplication};

/// Repository for characters, their loadouts and inventories.
pub trait CharacterRepository: Send + Sync {
    fn character(&self, id: &str) -> Result<Option<CharacterProfile>>;

    fn loadout(&self, id: &str) -> Result<Option<Loadout>>;

    /// Insert or replace a character together with its loadout.
    fn insert(&self, character: CharacterProfile, loadout: Loadout) -> Result<()>;

    /// Add experience, gold and loot, then apply level-ups.
    ///
    /// The whole update happens under one write, so concurrent rewards for
    /// the same character never overwrite each other.
    fn apply_rewards(&self, id: &str, rewards: &RewardResult) -> Result<RewardApplication>;

    fn inventory(&self, id: &str) -> Result<Vec<InventoryStack>>;
}

/// Repository for mission definitions.
pub trait MissionRepository: Send + Sync {
    fn mission(&self, id: &str) -> Result<Option<Mission>>;

    fn insert(&self, mission: Mission) -> Result<()>;

    /// Mission ids in ascending order.
    fn list(&self) -> Result<Vec<String>>;
}

/// Append-only store of combat encounter records.
pub trait EncounterRepository: Send + Sync {
    fn append(&self, encounter: CombatEncounter) -> Result<()>;

    /// Encounters of one character in insertion order.
    fn for_character(&self, character_id: &str) -> Result<Vec<CombatEncounter>>;
}

/// Repository for idle sessions.
pub trait IdleSessionRepository: Send + Sync {
    /// Fails with [`RepositoryError::Duplicate`](super::RepositoryError::Duplicate)
    /// when the session id is taken.
    fn insert(&self, session: IdleSession) -> Result<()>;

    fn load(&self, id: &str) -> Result<Option<IdleSession>>;

    /// Marks the session claimed with the given result unless it already is.
    fn claim(
        &self,
        id: &str,
        ended_at: DateTime<Utc>,
        hours_offline: f64,
        rewards: RewardResult,
    ) -> Result<ClaimOutcome>;

    /// Reopens a claimed session whose rewards could not be applied.
    fn release(&self, id: &str) -> Result<()>;
}
