//! Battle driver.
//!
//! [`start_combat`] is the single entry point callers use: it builds actors,
//! runs the [`TurnScheduler`] and returns a [`CombatReport`]. The report can
//! be condensed into a [`CombatEncounter`] for storage.
pub mod encounter;
pub mod record;
pub mod scheduler;

pub use encounter::{
    CombatReport, CombatRequest, build_character_actor, build_enemy_actors, start_combat,
    start_combat_with_seed,
};
pub use record::{CombatEncounter, EncounterResult, EncounterSummary};
pub use scheduler::{CombatOutcome, CombatPhase, TurnScheduler};
