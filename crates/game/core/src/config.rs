/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Maximum number of rounds before the battle ends as a defeat.
    pub round_cap: u32,
    /// Maximum number of log entries kept in a persisted encounter record.
    pub encounter_log_limit: usize,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum concurrently active status effects on a single actor.
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROUND_CAP: u32 = 20;
    pub const DEFAULT_ENCOUNTER_LOG_LIMIT: usize = 200;

    pub fn new() -> Self {
        Self {
            round_cap: Self::DEFAULT_ROUND_CAP,
            encounter_log_limit: Self::DEFAULT_ENCOUNTER_LOG_LIMIT,
        }
    }

    #[must_use]
    pub fn with_round_cap(mut self, round_cap: u32) -> Self {
        self.round_cap = round_cap;
        self
    }

    #[must_use]
    pub fn with_encounter_log_limit(mut self, limit: usize) -> Self {
        self.encounter_log_limit = limit;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
