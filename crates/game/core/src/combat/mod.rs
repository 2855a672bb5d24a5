//! Combat resolution.
//!
//! Pure functions over a battle's actor slice:
//!
//! - [`select_target`]: who an ability hits
//! - [`resolve`]: what the ability does, as [`LogEntry`] values
//! - [`damage`]: the arithmetic shared by strikes and heals

pub mod damage;
pub mod log;
pub mod resolve;
pub mod targeting;

pub use damage::{MITIGATION_PER_DEFENSE, ability_power, hit_damage, mitigation, roll_variance};
pub use log::{LogAction, LogEntry};
pub use resolve::resolve;
pub use targeting::{Target, select_target};
