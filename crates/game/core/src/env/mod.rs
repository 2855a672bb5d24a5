//! Battle inputs supplied by the caller.
//!
//! Characters, loadouts, missions and enemy templates are read-only data
//! handed to the engine by reference; the engine never reaches into ambient
//! state. The single random stream of a battle also lives here.
mod character;
mod mission;
mod rng;

pub use character::{CharacterProfile, EquipmentSlot, EquippedItem, Item, Loadout, LoadoutAbility};
pub use mission::{EnemyAbility, EnemyTemplate, LootEntry, LootTable, Mission, MissionEnemy};
pub use rng::{CombatRng, PcgRng, derive_seed};
