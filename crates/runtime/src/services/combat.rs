use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use game_core::{
    CharacterProfile, CombatConfig, CombatEncounter, CombatReport, CombatRequest, Loadout,
    Mission, start_combat_with_seed,
};

use crate::api::{Result, RuntimeError};
use crate::repository::{
    CharacterRepository, EncounterRepository, MissionRepository, RewardApplication,
};

/// Everything a finished combat changed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CombatResolution {
    pub encounter: CombatEncounter,
    pub applied: RewardApplication,
}

impl CombatResolution {
    pub fn character(&self) -> &CharacterProfile {
        &self.applied.character
    }
}

/// Runs battles and applies their rewards.
#[derive(Clone)]
pub struct CombatService {
    characters: Arc<dyn CharacterRepository>,
    missions: Arc<dyn MissionRepository>,
    encounters: Arc<dyn EncounterRepository>,
    config: CombatConfig,
}

impl CombatService {
    pub fn new(
        characters: Arc<dyn CharacterRepository>,
        missions: Arc<dyn MissionRepository>,
        encounters: Arc<dyn EncounterRepository>,
        config: CombatConfig,
    ) -> Self {
        Self {
            characters,
            missions,
            encounters,
            config,
        }
    }

    /// Fights `mission_id` with the seed derived from `at` and the ids.
    pub fn run(
        &self,
        character_id: &str,
        mission_id: &str,
        at: DateTime<Utc>,
    ) -> Result<CombatResolution> {
        self.run_inner(character_id, mission_id, at, None)
    }

    /// Fights with an explicit seed, e.g. to reproduce a recorded battle.
    pub fn run_with_seed(
        &self,
        character_id: &str,
        mission_id: &str,
        at: DateTime<Utc>,
        seed: u64,
    ) -> Result<CombatResolution> {
        self.run_inner(character_id, mission_id, at, Some(seed))
    }

    /// Simulates without touching any repository.
    #[tracing::instrument(skip(self))]
    pub fn simulate(
        &self,
        character_id: &str,
        mission_id: &str,
        at: DateTime<Utc>,
        seed: Option<u64>,
    ) -> Result<CombatReport> {
        let (character, loadout, mission) = self.inputs(character_id, mission_id)?;
        let request = CombatRequest {
            character: &character,
            loadout: &loadout,
            mission: &mission,
            timestamp_ms: at.timestamp_millis(),
        };
        let seed = seed.unwrap_or_else(|| request.seed());
        Ok(start_combat_with_seed(&request, seed, &self.config)?)
    }

    #[tracing::instrument(skip(self))]
    fn run_inner(
        &self,
        character_id: &str,
        mission_id: &str,
        at: DateTime<Utc>,
        seed: Option<u64>,
    ) -> Result<CombatResolution> {
        let (character, loadout, mission) = self.inputs(character_id, mission_id)?;
        let request = CombatRequest {
            character: &character,
            loadout: &loadout,
            mission: &mission,
            timestamp_ms: at.timestamp_millis(),
        };
        let seed = seed.unwrap_or_else(|| request.seed());

        let report = start_combat_with_seed(&request, seed, &self.config)?;
        tracing::info!(
            character = character_id,
            mission = mission_id,
            seed,
            rounds = report.outcome.rounds,
            victory = report.outcome.victory,
            "combat finished"
        );

        // Recorded before rewards: a failed append must not pay out.
        let encounter =
            CombatEncounter::from_report(&request, &report, self.config.encounter_log_limit);
        self.encounters.append(encounter.clone())?;

        let applied = self
            .characters
            .apply_rewards(character_id, &report.rewards)?;
        tracing::debug!(
            experience = report.rewards.experience,
            gold = report.rewards.gold,
            drops = report.rewards.loot.len(),
            "rewards applied"
        );
        if applied.progress.leveled_up() {
            tracing::debug!(
                from = applied.progress.previous,
                to = applied.progress.current,
                "character leveled up"
            );
        }

        Ok(CombatResolution { encounter, applied })
    }

    /// Loads the battle inputs, failing before any simulation.
    fn inputs(
        &self,
        character_id: &str,
        mission_id: &str,
    ) -> Result<(CharacterProfile, Loadout, Mission)> {
        let Some(character) = self.characters.character(character_id)? else {
            tracing::warn!(character = character_id, "unknown character");
            return Err(RuntimeError::CharacterNotFound(character_id.to_string()));
        };
        let Some(loadout) = self.characters.loadout(character_id)? else {
            tracing::warn!(character = character_id, "character without loadout");
            return Err(RuntimeError::LoadoutNotFound(character_id.to_string()));
        };
        let Some(mission) = self.missions.mission(mission_id)? else {
            tracing::warn!(mission = mission_id, "unknown mission");
            return Err(RuntimeError::MissionNotFound(mission_id.to_string()));
        };
        Ok((character, loadout, mission))
    }
}
