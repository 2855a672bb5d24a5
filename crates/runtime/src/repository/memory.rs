//! In-memory repository implementations guarded by `RwLock`.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use game_core::{
    CharacterProfile, CombatEncounter, Loadout, Mission, RewardResult, apply_level_ups,
};

use super::error::{RepositoryError, Result};
use super::records::{ClaimOutcome, IdleSession, InventoryStack, RewardApplication};
use super::traits::{
    CharacterRepository, EncounterRepository, IdleSessionRepository, MissionRepository,
};

// ============================================================================
// Characters
// ============================================================================

#[derive(Clone, Debug)]
struct CharacterEntry {
    profile: CharacterProfile,
    loadout: Loadout,
    inventory: Vec<InventoryStack>,
}

impl CharacterEntry {
    fn stash(&mut self, item_slug: &str, quantity: u32) {
        match self
            .inventory
            .iter_mut()
            .find(|stack| stack.item_slug == item_slug)
        {
            Some(stack) => stack.quantity = stack.quantity.saturating_add(quantity),
            None => self.inventory.push(InventoryStack {
                item_slug: item_slug.to_string(),
                quantity,
            }),
        }
    }
}

/// In-memory implementation of [`CharacterRepository`].
#[derive(Debug, Default)]
pub struct InMemoryCharacterRepo {
    entries: RwLock<HashMap<String, CharacterEntry>>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterRepository for InMemoryCharacterRepo {
    fn character(&self, id: &str) -> Result<Option<CharacterProfile>> {
        let entries = self.entries.read()?;
        Ok(entries.get(id).map(|entry| entry.profile.clone()))
    }

    fn loadout(&self, id: &str) -> Result<Option<Loadout>> {
        let entries = self.entries.read()?;
        Ok(entries.get(id).map(|entry| entry.loadout.clone()))
    }

    fn insert(&self, character: CharacterProfile, loadout: Loadout) -> Result<()> {
        let mut entries = self.entries.write()?;
        entries.insert(
            character.id.clone(),
            CharacterEntry {
                profile: character,
                loadout,
                inventory: Vec::new(),
            },
        );
        Ok(())
    }

    fn apply_rewards(&self, id: &str, rewards: &RewardResult) -> Result<RewardApplication> {
        let mut entries = self.entries.write()?;
        let entry = entries.get_mut(id).ok_or_else(|| RepositoryError::Missing {
            kind: "character",
            id: id.to_string(),
        })?;

        let profile = &mut entry.profile;
        profile.experience = profile.experience.saturating_add(rewards.experience);
        profile.gold = profile.gold.saturating_add(rewards.gold);
        let progress = apply_level_ups(profile.level, profile.experience);
        profile.level = progress.current;

        for drop in &rewards.loot {
            entry.stash(&drop.item_slug, drop.quantity);
        }

        Ok(RewardApplication {
            character: entry.profile.clone(),
            progress,
        })
    }

    fn inventory(&self, id: &str) -> Result<Vec<InventoryStack>> {
        let entries = self.entries.read()?;
        Ok(entries
            .get(id)
            .map(|entry| entry.inventory.clone())
            .unwrap_or_default())
    }
}

// ============================================================================
// Missions
// ============================================================================

/// In-memory implementation of [`MissionRepository`].
#[derive(Debug, Default)]
pub struct InMemoryMissionRepo {
    missions: RwLock<BTreeMap<String, Mission>>,
}

impl InMemoryMissionRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MissionRepository for InMemoryMissionRepo {
    fn mission(&self, id: &str) -> Result<Option<Mission>> {
        Ok(self.missions.read()?.get(id).cloned())
    }

    fn insert(&self, mission: Mission) -> Result<()> {
        self.missions.write()?.insert(mission.id.clone(), mission);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.missions.read()?.keys().cloned().collect())
    }
}

// ============================================================================
// Encounters
// ============================================================================

/// In-memory implementation of [`EncounterRepository`].
#[derive(Debug, Default)]
pub struct InMemoryEncounterRepo {
    encounters: RwLock<Vec<CombatEncounter>>,
}

impl InMemoryEncounterRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EncounterRepository for InMemoryEncounterRepo {
    fn append(&self, encounter: CombatEncounter) -> Result<()> {
        self.encounters.write()?.push(encounter);
        Ok(())
    }

    fn for_character(&self, character_id: &str) -> Result<Vec<CombatEncounter>> {
        let encounters = self.encounters.read()?;
        Ok(encounters
            .iter()
            .filter(|encounter| encounter.character_id == character_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Idle sessions
// ============================================================================

/// In-memory implementation of [`IdleSessionRepository`].
#[derive(Debug, Default)]
pub struct InMemoryIdleSessionRepo {
    sessions: RwLock<HashMap<String, IdleSession>>,
}

impl InMemoryIdleSessionRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdleSessionRepository for InMemoryIdleSessionRepo {
    fn insert(&self, session: IdleSession) -> Result<()> {
        let mut sessions = self.sessions.write()?;
        if sessions.contains_key(&session.id) {
            return Err(RepositoryError::Duplicate {
                kind: "idle session",
                id: session.id,
            });
        }
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<IdleSession>> {
        Ok(self.sessions.read()?.get(id).cloned())
    }

    fn claim(
        &self,
        id: &str,
        ended_at: DateTime<Utc>,
        hours_offline: f64,
        rewards: RewardResult,
    ) -> Result<ClaimOutcome> {
        let mut sessions = self.sessions.write()?;
        let session = sessions.get_mut(id).ok_or_else(|| RepositoryError::Missing {
            kind: "idle session",
            id: id.to_string(),
        })?;

        if session.claimed {
            return Ok(ClaimOutcome::AlreadyClaimed(session.clone()));
        }

        session.claimed = true;
        session.ended_at = Some(ended_at);
        session.hours_offline = hours_offline;
        session.rewards = Some(rewards);
        Ok(ClaimOutcome::Claimed(session.clone()))
    }

    fn release(&self, id: &str) -> Result<()> {
        let mut sessions = self.sessions.write()?;
        let session = sessions.get_mut(id).ok_or_else(|| RepositoryError::Missing {
            kind: "idle session",
            id: id.to_string(),
        })?;
        session.claimed = false;
        session.ended_at = None;
        session.hours_offline = 0.0;
        session.rewards = None;
        Ok(())
    }
}
