//! Reward engine.
//!
//! Pure functions turning a combat outcome or an idle window into
//! experience, gold and loot, plus the experience curve. Results are applied
//! additively by the caller; nothing here touches a character.
//!
//! # Formulas
//!
//! ```text
//! combat:
//!   difficulty = 1 + mission.difficulty × 0.2
//!   efficiency = max(0.8, 1.4 − rounds × 0.03)
//!   xp         = round(base_xp × difficulty × efficiency × (victory ? 1 : 0.25))
//!   gold       = round(base_gold × difficulty × (victory ? efficiency : 0.3))
//!
//! idle:
//!   hours      = min(hours_offline, 12)
//!   ratio      = clamp(character_power / mission_power, 0.6, 1.5)
//!   xp         = round(base_xp × hours × 6 × ratio)      (base is per 10 minutes)
//!   gold       = round(base_gold × hours × 6 × ratio)
//!   passes     = floor(hours / (duration_minutes / 30))
//! ```

mod loot;
mod progression;

pub use loot::{LootBag, LootDrop};
pub use progression::{LevelProgress, apply_level_ups, level_from_xp, xp_for_level};

use crate::combat::damage::to_amount;
use crate::env::{CombatRng, Mission};

/// Ceiling on the offline hours an idle claim pays out for.
pub const MAX_IDLE_HOURS: f64 = 12.0;

/// Ten-minute baselines per hour.
const BASELINES_PER_HOUR: f64 = 6.0;

const MIN_POWER_RATIO: f64 = 0.6;
const MAX_POWER_RATIO: f64 = 1.5;

/// Experience, gold and loot produced by one combat or idle claim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardResult {
    pub experience: u64,
    pub gold: u64,
    pub loot: Vec<LootDrop>,
}

impl RewardResult {
    pub fn is_empty(&self) -> bool {
        self.experience == 0 && self.gold == 0 && self.loot.is_empty()
    }
}

fn to_reward(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}

/// Rewards for a finished battle.
///
/// Loot is only rolled on victory: every guaranteed entry, then every roll
/// entry, each against its own chance.
pub fn combat_rewards(
    mission: &Mission,
    victory: bool,
    rounds: u32,
    rng: &mut (impl CombatRng + ?Sized),
) -> RewardResult {
    let difficulty = 1.0 + f64::from(mission.difficulty) * 0.2;
    let efficiency = (1.4 - f64::from(rounds) * 0.03).max(0.8);
    let xp_factor = if victory { 1.0 } else { 0.25 };
    let gold_factor = if victory { efficiency } else { 0.3 };

    let experience = to_reward(mission.base_experience as f64 * difficulty * efficiency * xp_factor);
    let gold = to_reward(mission.base_gold as f64 * difficulty * gold_factor);

    let mut bag = LootBag::new();
    if victory {
        bag.roll(&mission.loot_table.guaranteed, 1.0, rng);
        bag.roll(&mission.loot_table.rolls, 1.0, rng);
    }

    RewardResult {
        experience,
        gold,
        loot: bag.into_drops(),
    }
}

/// Power ratio between a character and a mission, clamped to `[0.6, 1.5]`.
///
/// A mission without power reads as the maximum ratio.
pub fn power_ratio(character_power: u32, mission_power: u32) -> f64 {
    if mission_power == 0 {
        return MAX_POWER_RATIO;
    }
    (f64::from(character_power) / f64::from(mission_power)).clamp(MIN_POWER_RATIO, MAX_POWER_RATIO)
}

/// Rewards for an offline window spent on a mission.
///
/// Hours beyond [`MAX_IDLE_HOURS`] are ignored; negative or NaN hours pay
/// nothing.
pub fn idle_rewards(
    mission: &Mission,
    hours_offline: f64,
    character_power: u32,
    mission_power: u32,
    rng: &mut (impl CombatRng + ?Sized),
) -> RewardResult {
    let hours = if hours_offline.is_nan() {
        0.0
    } else {
        hours_offline.clamp(0.0, MAX_IDLE_HOURS)
    };
    let ratio = power_ratio(character_power, mission_power);
    let scale = hours * BASELINES_PER_HOUR * ratio;

    let experience = to_reward(mission.base_experience as f64 * scale);
    let gold = to_reward(mission.base_gold as f64 * scale);

    let passes = if mission.duration_minutes == 0 {
        0
    } else {
        to_amount((hours / (f64::from(mission.duration_minutes) / 30.0)).floor())
    };

    let mut bag = LootBag::new();
    for _ in 0..passes {
        bag.roll(&mission.loot_table.rolls, 0.5 * ratio, rng);
    }

    RewardResult {
        experience,
        gold,
        loot: bag.into_drops(),
    }
}
