//! Deterministic turn-based combat engine.
//!
//! `game-core` simulates a battle between one character and a mission's
//! enemies and derives the rewards. It performs no I/O: all data comes in as
//! explicit arguments and a single seeded [`CombatRng`] stream drives every
//! random decision, so the same seed always reproduces the same battle.
//! Supporting crates (content loaders, runtime services) depend on the types
//! re-exported here.
pub mod ability;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod rewards;
pub mod state;
pub mod stats;
pub mod status;

pub use ability::{
    AbilityDefinition, AbilityFormula, BuffFormula, Finisher, HealFormula, StrikeFormula,
    TargetKind,
};
pub use combat::{LogAction, LogEntry, Target, resolve, select_target};
pub use config::CombatConfig;
pub use engine::{
    CombatEncounter, CombatOutcome, CombatPhase, CombatReport, CombatRequest, EncounterResult,
    EncounterSummary, TurnScheduler, start_combat, start_combat_with_seed,
};
pub use env::{
    CharacterProfile, CombatRng, EnemyAbility, EnemyTemplate, EquipmentSlot, EquippedItem, Item,
    Loadout, LoadoutAbility, LootEntry, LootTable, Mission, MissionEnemy, PcgRng, derive_seed,
};
pub use error::{ErrorSeverity, GameError, SetupError};
pub use rewards::{
    LevelProgress, LootDrop, MAX_IDLE_HOURS, RewardResult, apply_level_ups, combat_rewards,
    idle_rewards, level_from_xp, power_ratio, xp_for_level,
};
pub use state::{AbilitySlotState, ActorId, ActorKind, ActorState};
pub use stats::{
    StatBlock, StatCoefficients, StatDelta, StatKind, StatMultipliers, merge_stats, power_rating,
    scale_stats_for_level,
};
pub use status::{StatusEffectKind, StatusInstance, StatusLedger, StatusTemplate};
