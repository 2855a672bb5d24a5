//! Services applying combat and idle outcomes to persistent state.
//!
//! Services validate identifiers before any simulation, call into
//! `game-core`, then persist the resulting deltas through the repositories.

mod combat;
mod idle;

pub use combat::{CombatResolution, CombatService};
pub use idle::{IdleClaim, IdleService};
