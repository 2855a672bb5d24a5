//! Runtime wiring.
//!
//! [`Runtime`] owns the repositories and hands out services sharing them.
//! Repositories default to the in-memory implementations; the builder lets
//! callers inject their own.

use std::sync::Arc;

use game_content::ContentCatalog;
use game_core::CombatConfig;

use crate::api::Result;
use crate::repository::{
    CharacterRepository, EncounterRepository, IdleSessionRepository, InMemoryCharacterRepo,
    InMemoryEncounterRepo, InMemoryIdleSessionRepo, InMemoryMissionRepo, MissionRepository,
};
use crate::services::{CombatService, IdleService};

/// Repositories and configuration shared by every service.
#[derive(Clone)]
pub struct Runtime {
    characters: Arc<dyn CharacterRepository>,
    missions: Arc<dyn MissionRepository>,
    encounters: Arc<dyn EncounterRepository>,
    sessions: Arc<dyn IdleSessionRepository>,
    config: CombatConfig,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Builds an in-memory runtime seeded with every mission and hero of
    /// the catalogue.
    pub fn from_catalog(catalog: &ContentCatalog) -> Result<Self> {
        let runtime = Self::builder().config(catalog.config.clone()).build();
        for mission in catalog.missions.values() {
            runtime.missions.insert(mission.clone())?;
        }
        for hero in catalog.heroes.values() {
            runtime
                .characters
                .insert(hero.profile.clone(), hero.loadout.clone())?;
        }
        tracing::debug!(
            missions = catalog.missions.len(),
            heroes = catalog.heroes.len(),
            "runtime seeded from catalog"
        );
        Ok(runtime)
    }

    pub fn combat(&self) -> CombatService {
        CombatService::new(
            Arc::clone(&self.characters),
            Arc::clone(&self.missions),
            Arc::clone(&self.encounters),
            self.config.clone(),
        )
    }

    pub fn idle(&self) -> IdleService {
        IdleService::new(
            Arc::clone(&self.characters),
            Arc::clone(&self.missions),
            Arc::clone(&self.sessions),
        )
    }

    pub fn characters(&self) -> &dyn CharacterRepository {
        self.characters.as_ref()
    }

    pub fn missions(&self) -> &dyn MissionRepository {
        self.missions.as_ref()
    }

    pub fn encounters(&self) -> &dyn EncounterRepository {
        self.encounters.as_ref()
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }
}

/// Builder for [`Runtime`]; unset repositories default to in-memory ones.
#[derive(Default)]
pub struct RuntimeBuilder {
    config: CombatConfig,
    characters: Option<Arc<dyn CharacterRepository>>,
    missions: Option<Arc<dyn MissionRepository>>,
    encounters: Option<Arc<dyn EncounterRepository>>,
    sessions: Option<Arc<dyn IdleSessionRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Override combat configuration
    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn characters(mut self, repo: Arc<dyn CharacterRepository>) -> Self {
        self.characters = Some(repo);
        self
    }

    pub fn missions(mut self, repo: Arc<dyn MissionRepository>) -> Self {
        self.missions = Some(repo);
        self
    }

    pub fn encounters(mut self, repo: Arc<dyn EncounterRepository>) -> Self {
        self.encounters = Some(repo);
        self
    }

    pub fn idle_sessions(mut self, repo: Arc<dyn IdleSessionRepository>) -> Self {
        self.sessions = Some(repo);
        self
    }

    pub fn build(self) -> Runtime {
        Runtime {
            characters: self
                .characters
                .unwrap_or_else(|| Arc::new(InMemoryCharacterRepo::new())),
            missions: self
                .missions
                .unwrap_or_else(|| Arc::new(InMemoryMissionRepo::new())),
            encounters: self
                .encounters
                .unwrap_or_else(|| Arc::new(InMemoryEncounterRepo::new())),
            sessions: self
                .sessions
                .unwrap_or_else(|| Arc::new(InMemoryIdleSessionRepo::new())),
            config: self.config,
        }
    }
}
