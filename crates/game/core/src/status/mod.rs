//! Status effect system.
//!
//! A [`StatusTemplate`] is immutable catalogue data; applying it yields a
//! [`StatusInstance`] with a `remaining` countdown stored in the owner's
//! [`StatusLedger`].
//!
//! # Lifecycle
//!
//! 1. `add` on application (refresh when the name is already active)
//! 2. `tick_start` when the owner's turn begins (DoT/HoT commands, prevention)
//! 3. `tick` once the owner's turn ends (countdown, expiry)

pub mod ledger;
pub mod template;

pub use ledger::{Absorbed, AddOutcome, StatusCommand, StatusLedger, StatusModifiers, TurnStart};
pub use template::{StatusEffectKind, StatusInstance, StatusTemplate};
