use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use game_core::{PcgRng, derive_seed, idle_rewards, power_rating};

use crate::api::{Result, RuntimeError};
use crate::repository::{
    CharacterRepository, ClaimOutcome, IdleSession, IdleSessionRepository, MissionRepository,
    RewardApplication,
};

/// Result of claiming an idle session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdleClaim {
    pub session: IdleSession,
    /// `None` when the session had already been claimed.
    pub applied: Option<RewardApplication>,
}

/// Starts and settles offline farming sessions.
#[derive(Clone)]
pub struct IdleService {
    characters: Arc<dyn CharacterRepository>,
    missions: Arc<dyn MissionRepository>,
    sessions: Arc<dyn IdleSessionRepository>,
}

impl IdleService {
    pub fn new(
        characters: Arc<dyn CharacterRepository>,
        missions: Arc<dyn MissionRepository>,
        sessions: Arc<dyn IdleSessionRepository>,
    ) -> Self {
        Self {
            characters,
            missions,
            sessions,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn start(
        &self,
        character_id: &str,
        mission_id: &str,
        started_at: DateTime<Utc>,
    ) -> Result<IdleSession> {
        if self.characters.character(character_id)?.is_none() {
            tracing::warn!(character = character_id, "unknown character");
            return Err(RuntimeError::CharacterNotFound(character_id.to_string()));
        }
        if self.missions.mission(mission_id)?.is_none() {
            tracing::warn!(mission = mission_id, "unknown mission");
            return Err(RuntimeError::MissionNotFound(mission_id.to_string()));
        }

        let session = IdleSession::new(character_id, mission_id, started_at);
        self.sessions.insert(session.clone())?;
        tracing::info!(session = %session.id, "idle session started");
        Ok(session)
    }

    /// Settles a session; claiming it again returns the stored result.
    ///
    /// The session is reopened when the rewards cannot be applied, so a
    /// later claim pays them out.
    #[tracing::instrument(skip(self))]
    pub fn claim(&self, session_id: &str, now: DateTime<Utc>) -> Result<IdleClaim> {
        let Some(session) = self.sessions.load(session_id)? else {
            tracing::warn!(session = session_id, "unknown idle session");
            return Err(RuntimeError::SessionNotFound(session_id.to_string()));
        };
        if session.claimed {
            tracing::debug!("session already claimed");
            return Ok(IdleClaim {
                session,
                applied: None,
            });
        }

        let character = self
            .characters
            .character(&session.character_id)?
            .ok_or_else(|| RuntimeError::CharacterNotFound(session.character_id.clone()))?;
        let loadout = self
            .characters
            .loadout(&session.character_id)?
            .ok_or_else(|| RuntimeError::LoadoutNotFound(session.character_id.clone()))?;
        let mission = self
            .missions
            .mission(&session.mission_id)?
            .ok_or_else(|| RuntimeError::MissionNotFound(session.mission_id.clone()))?;

        let hours = session.hours_until(now);
        let character_power = power_rating(&character.combat_stats(&loadout));
        let mut rng = PcgRng::seeded(derive_seed(
            session.started_at.timestamp_millis(),
            &session.character_id,
            &session.mission_id,
        ));
        let rewards = idle_rewards(
            &mission,
            hours,
            character_power,
            mission.power_rating(),
            &mut rng,
        );

        match self.sessions.claim(session_id, now, hours, rewards)? {
            ClaimOutcome::Claimed(session) => {
                let rewards = session.rewards.clone().unwrap_or_default();
                let applied = match self
                    .characters
                    .apply_rewards(&session.character_id, &rewards)
                {
                    Ok(applied) => applied,
                    Err(error) => {
                        tracing::warn!(%error, "rewards not applied, reopening session");
                        self.sessions.release(session_id)?;
                        return Err(error.into());
                    }
                };
                tracing::info!(
                    hours,
                    experience = rewards.experience,
                    gold = rewards.gold,
                    "idle session claimed"
                );
                Ok(IdleClaim {
                    session,
                    applied: Some(applied),
                })
            }
            ClaimOutcome::AlreadyClaimed(session) => {
                tracing::debug!("session claimed concurrently");
                Ok(IdleClaim {
                    session,
                    applied: None,
                })
            }
        }
    }
}
