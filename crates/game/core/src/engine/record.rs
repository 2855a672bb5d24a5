//! Immutable encounter records kept for later inspection.

use crate::combat::LogEntry;
use crate::rewards::RewardResult;

use super::encounter::{CombatReport, CombatRequest};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum EncounterResult {
    Victory,
    Defeat,
}

impl From<bool> for EncounterResult {
    fn from(victory: bool) -> Self {
        if victory { Self::Victory } else { Self::Defeat }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSummary {
    pub rewards: RewardResult,
    pub character_remaining_health: u32,
    pub enemy_count: u32,
}

/// Persisted trace of one battle: the seed reproduces it in full, the log
/// is truncated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEncounter {
    pub character_id: String,
    pub mission_id: String,
    pub timestamp_ms: i64,
    pub result: EncounterResult,
    pub rounds: u32,
    pub seed: u64,
    pub summary: EncounterSummary,
    pub logs: Vec<LogEntry>,
}

impl CombatEncounter {
    /// Keeps the first `log_limit` entries of the battle log.
    pub fn from_report(request: &CombatRequest<'_>, report: &CombatReport, log_limit: usize) -> Self {
        Self {
            character_id: request.character.id.clone(),
            mission_id: request.mission.id.clone(),
            timestamp_ms: request.timestamp_ms,
            result: report.outcome.victory.into(),
            rounds: report.outcome.rounds,
            seed: report.seed,
            summary: EncounterSummary {
                rewards: report.rewards.clone(),
                character_remaining_health: report.character_remaining_health,
                enemy_count: report.enemy_count,
            },
            logs: report.outcome.log.iter().take(log_limit).cloned().collect(),
        }
    }

    pub fn is_victory(&self) -> bool {
        self.result == EncounterResult::Victory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::LogAction;
    use crate::engine::CombatOutcome;
    use crate::env::{CharacterProfile, Loadout, Mission};
    use crate::state::ActorId;
    use crate::stats::StatBlock;

    #[test]
    fn record_truncates_logs() {
        let hero = CharacterProfile::new("hero-1", "Hero", StatBlock::new(10, 1, 1, 1, 1));
        let mission = Mission {
            id: "m-1".into(),
            name: "M".into(),
            difficulty: 0,
            base_experience: 0,
            base_gold: 0,
            duration_minutes: 0,
            loot_table: Default::default(),
            enemies: Vec::new(),
        };
        let loadout = Loadout::default();
        let request = CombatRequest {
            character: &hero,
            loadout: &loadout,
            mission: &mission,
            timestamp_ms: 42,
        };
        let report = CombatReport {
            seed: 7,
            outcome: CombatOutcome {
                rounds: 3,
                victory: false,
                log: (0..5)
                    .map(|round| LogEntry::new(round, ActorId(0), LogAction::Skip))
                    .collect(),
            },
            rewards: RewardResult::default(),
            character_remaining_health: 0,
            enemy_count: 1,
        };

        let record = CombatEncounter::from_report(&request, &report, 2);
        assert_eq!(record.logs.len(), 2);
        assert_eq!(record.result, EncounterResult::Defeat);
        assert_eq!(record.character_id, "hero-1");
        assert_eq!(record.seed, 7);
        assert_eq!(record.result.to_string(), "DEFEAT");
    }
}
