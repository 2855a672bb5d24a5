//! Per-battle combatant state.
//!
//! Actors are built fresh for every battle from catalogue and character data
//! and discarded afterwards. Only the resulting rewards are persisted.
mod abilities;
mod actor;

pub use abilities::{AbilitySlotState, select_slot};
pub use actor::{ActorId, ActorKind, ActorState, DamageTaken, StatusTick, TurnOpening};
