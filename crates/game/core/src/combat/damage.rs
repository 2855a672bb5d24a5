//! Damage and healing arithmetic.
//!
//! # Formula
//!
//! ```text
//! power      = base_power + Σ scaling[stat] × caster_effective[stat]
//! power     *= 1 + (draw − 0.5) × variance      (only when variance is set)
//! power     *= caster.damage_multiplier
//! per hit    = max(0, power − target_effective.defense × 0.4)
//!            × finisher (when the target is at or below the threshold)
//!            × target.incoming_damage_multiplier
//! ```

use crate::ability::Finisher;
use crate::env::CombatRng;
use crate::stats::{StatBlock, StatCoefficients};

/// Damage removed per point of effective defense.
pub const MITIGATION_PER_DEFENSE: f64 = 0.4;

/// Raw power of an ability before mitigation.
pub fn ability_power(base_power: u32, scaling: &StatCoefficients, caster: &StatBlock) -> f64 {
    f64::from(base_power) + scaling.dot(caster)
}

/// Applies a `1 ± variance/2` spread.
///
/// Consumes one draw whenever a variance is declared; non-finite or negative
/// spreads behave as zero.
pub fn roll_variance(power: f64, variance: Option<f64>, rng: &mut (impl CombatRng + ?Sized)) -> f64 {
    let Some(variance) = variance else {
        return power;
    };
    let draw = rng.next_f64();
    let spread = if variance.is_finite() { variance.max(0.0) } else { 0.0 };
    power * (1.0 + (draw - 0.5) * spread)
}

pub fn mitigation(defense: u32) -> f64 {
    f64::from(defense) * MITIGATION_PER_DEFENSE
}

/// Damage of a single hit, clamped to a non-negative integer.
pub fn hit_damage(
    power: f64,
    target_defense: u32,
    target_health_ratio: f64,
    finisher: Option<&Finisher>,
    incoming_multiplier: f64,
) -> u32 {
    let mut damage = (power - mitigation(target_defense)).max(0.0);
    if let Some(finisher) = finisher.filter(|f| f.applies_to(target_health_ratio)) {
        damage *= finisher.multiplier.max(0.0);
    }
    damage *= incoming_multiplier;
    to_amount(damage)
}

/// Rounds to the nearest non-negative integer; NaN reads as zero.
pub fn to_amount(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_scales_with_effective_stats() {
        let scaling = StatCoefficients {
            attack: 1.0,
            ..StatCoefficients::ZERO
        };
        let stats = StatBlock::new(120, 18, 10, 12, 6);
        assert_eq!(ability_power(20, &scaling, &stats), 38.0);
    }

    #[test]
    fn variance_spreads_symmetrically() {
        assert_eq!(roll_variance(100.0, Some(0.2), &mut || 0.0), 90.0);
        assert_eq!(roll_variance(100.0, Some(0.2), &mut || 0.5), 100.0);
        assert_eq!(roll_variance(100.0, None, &mut || -> f64 { panic!("no draw") }), 100.0);
    }

    #[test]
    fn mitigation_never_heals() {
        assert_eq!(hit_damage(38.0, 6, 1.0, None, 1.0), 36);
        assert_eq!(hit_damage(3.0, 100, 1.0, None, 1.0), 0);
    }

    #[test]
    fn finisher_applies_at_threshold() {
        let finisher = Finisher {
            threshold: 0.3,
            multiplier: 2.0,
        };
        assert_eq!(hit_damage(20.0, 0, 0.3, Some(&finisher), 1.0), 40);
        assert_eq!(hit_damage(20.0, 0, 0.31, Some(&finisher), 1.0), 20);
    }

    #[test]
    fn incoming_multiplier_scales_after_mitigation() {
        assert_eq!(hit_damage(30.0, 25, 1.0, None, 0.5), 10);
    }

    #[test]
    fn amounts_are_clamped() {
        assert_eq!(to_amount(f64::NAN), 0);
        assert_eq!(to_amount(-4.0), 0);
        assert_eq!(to_amount(2.5), 3);
    }
}
