//! Records owned by the persistence layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use game_core::{CharacterProfile, LevelProgress, RewardResult};

/// One inventory stack of a character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStack {
    pub item_slug: String,
    pub quantity: u32,
}

/// Character state after a reward was applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardApplication {
    pub character: CharacterProfile,
    pub progress: LevelProgress,
}

/// An offline farming window on a mission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdleSession {
    pub id: String,
    pub character_id: String,
    pub mission_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub hours_offline: f64,
    pub claimed: bool,
    pub rewards: Option<RewardResult>,
}

impl IdleSession {
    pub fn new(
        character_id: impl Into<String>,
        mission_id: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let character_id = character_id.into();
        let mission_id = mission_id.into();
        Self {
            id: format!(
                "idle-{}-{}-{}",
                character_id,
                mission_id,
                started_at.timestamp_millis()
            ),
            character_id,
            mission_id,
            started_at,
            ended_at: None,
            hours_offline: 0.0,
            claimed: false,
            rewards: None,
        }
    }

    /// Offline hours between the session start and `now`, never negative.
    pub fn hours_until(&self, now: DateTime<Utc>) -> f64 {
        let millis = (now - self.started_at).num_milliseconds().max(0);
        millis as f64 / 3_600_000.0
    }
}

/// Result of a compare-and-set claim on an idle session.
#[derive(Clone, Debug, PartialEq)]
pub enum ClaimOutcome {
    /// This call flipped the session to claimed.
    Claimed(IdleSession),
    /// The session had been claimed before; carries the stored result.
    AlreadyClaimed(IdleSession),
}

impl ClaimOutcome {
    pub fn session(&self) -> &IdleSession {
        match self {
            Self::Claimed(session) | Self::AlreadyClaimed(session) => session,
        }
    }

    pub fn into_session(self) -> IdleSession {
        match self {
            Self::Claimed(session) | Self::AlreadyClaimed(session) => session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn hours_are_measured_from_start() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let session = IdleSession::new("aria", "wolf-den", start);

        assert_eq!(session.hours_until(start + Duration::minutes(90)), 1.5);
        assert_eq!(session.hours_until(start - Duration::hours(1)), 0.0);
        assert!(session.id.starts_with("idle-aria-wolf-den-"));
    }
}
