//! Fractional per-stat weights.

use super::block::{StatBlock, StatKind};

/// Per-stat coefficients; missing fields are zero.
///
/// Used for ability scaling (`power = base + Σ stat × coefficient`) and for
/// per-level stat growth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatCoefficients {
    pub health: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub magic: f64,
}

impl StatCoefficients {
    pub const ZERO: Self = Self {
        health: 0.0,
        attack: 0.0,
        defense: 0.0,
        speed: 0.0,
        magic: 0.0,
    };

    pub const fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::Magic => self.magic,
        }
    }

    /// Weighted sum of `stats` against these coefficients.
    ///
    /// Non-finite coefficients contribute nothing.
    pub fn dot(&self, stats: &StatBlock) -> f64 {
        StatKind::ALL
            .iter()
            .map(|&kind| {
                let coefficient = self.get(kind);
                if coefficient.is_finite() {
                    coefficient * f64::from(stats.get(kind))
                } else {
                    0.0
                }
            })
            .sum()
    }
}

/// Multiplicative stat and damage factors carried by status effects.
///
/// Every field defaults to `1.0` (neutral).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatMultipliers {
    pub health: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub magic: f64,
    /// Outgoing damage factor.
    pub damage_dealt: f64,
    /// Incoming damage factor.
    pub damage_taken: f64,
}

impl StatMultipliers {
    pub const NEUTRAL: Self = Self {
        health: 1.0,
        attack: 1.0,
        defense: 1.0,
        speed: 1.0,
        magic: 1.0,
        damage_dealt: 1.0,
        damage_taken: 1.0,
    };

    pub const fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::Magic => self.magic,
        }
    }

    fn fields_mut(&mut self) -> [&mut f64; 7] {
        [
            &mut self.health,
            &mut self.attack,
            &mut self.defense,
            &mut self.speed,
            &mut self.magic,
            &mut self.damage_dealt,
            &mut self.damage_taken,
        ]
    }

    fn fields(&self) -> [f64; 7] {
        [
            self.health,
            self.attack,
            self.defense,
            self.speed,
            self.magic,
            self.damage_dealt,
            self.damage_taken,
        ]
    }

    /// Field-wise product. Negative or non-finite factors are treated as neutral.
    pub fn combine(&self, other: &Self) -> Self {
        let mut combined = *self;
        for (field, factor) in combined.fields_mut().into_iter().zip(other.fields()) {
            *field *= sanitize_factor(factor);
        }
        combined
    }

    /// Field-wise keep whichever factor deviates further from neutral.
    pub fn strongest(&self, other: &Self) -> Self {
        let mut merged = *self;
        for (field, candidate) in merged.fields_mut().into_iter().zip(other.fields()) {
            let current = sanitize_factor(*field);
            let candidate = sanitize_factor(candidate);
            *field = if (candidate - 1.0).abs() > (current - 1.0).abs() {
                candidate
            } else {
                current
            };
        }
        merged
    }
}

impl Default for StatMultipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

fn sanitize_factor(factor: f64) -> f64 {
    if factor.is_finite() && factor >= 0.0 {
        factor
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_product_scales_selected_stats() {
        let scaling = StatCoefficients {
            attack: 1.0,
            magic: 0.5,
            ..StatCoefficients::ZERO
        };
        let stats = StatBlock::new(120, 18, 10, 12, 6);
        assert_eq!(scaling.dot(&stats), 21.0);
    }

    #[test]
    fn multipliers_combine_by_product() {
        let haste = StatMultipliers {
            speed: 1.5,
            ..StatMultipliers::NEUTRAL
        };
        let slow = StatMultipliers {
            speed: 0.5,
            ..StatMultipliers::NEUTRAL
        };
        assert_eq!(haste.combine(&slow).speed, 0.75);
        assert_eq!(haste.combine(&slow).attack, 1.0);
    }

    #[test]
    fn strongest_keeps_largest_deviation() {
        let weak_curse = StatMultipliers {
            attack: 0.9,
            ..StatMultipliers::NEUTRAL
        };
        let strong_curse = StatMultipliers {
            attack: 0.6,
            defense: f64::NAN,
            ..StatMultipliers::NEUTRAL
        };
        let merged = weak_curse.strongest(&strong_curse);
        assert_eq!(merged.attack, 0.6);
        assert_eq!(merged.defense, 1.0);
        assert_eq!(strong_curse.strongest(&weak_curse).attack, 0.6);
    }
}
