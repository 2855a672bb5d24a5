//! Ability formulas.
//!
//! The formula is a closed sum type, so the resolver's dispatch is
//! exhaustive and an "unknown formula type" cannot be represented.
//!
//! ## Examples
//!
//! ```ignore
//! // 20 + 100% attack, three independently mitigated hits
//! AbilityFormula::Physical(StrikeFormula {
//!     scaling: StatCoefficients { attack: 1.0, ..StatCoefficients::ZERO },
//!     hits: Some(3),
//!     ..StrikeFormula::default()
//! })
//! ```

use crate::stats::StatCoefficients;
use crate::status::StatusTemplate;

/// How an ability computes its mechanical outcome.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityFormula {
    Physical(StrikeFormula),
    Magical(StrikeFormula),
    Healing(HealFormula),
    Buff(BuffFormula),
}

impl AbilityFormula {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Physical(_) => "physical",
            Self::Magical(_) => "magical",
            Self::Healing(_) => "healing",
            Self::Buff(_) => "buff",
        }
    }
}

/// Damage-dealing formula shared by physical and magical abilities.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrikeFormula {
    pub scaling: StatCoefficients,
    /// Fractional spread: power is multiplied by `1 ± variance/2`.
    pub variance: Option<f64>,
    /// Status rolled onto the target after the strike.
    pub status: Option<StatusTemplate>,
    /// Status rolled onto the caster after the strike.
    pub self_status: Option<StatusTemplate>,
    pub finisher: Option<Finisher>,
    /// Fraction of dealt damage returned to the caster as healing.
    pub life_steal: Option<f64>,
    /// Number of independently mitigated hits (default 1).
    pub hits: Option<u32>,
}

impl StrikeFormula {
    pub fn hit_count(&self) -> u32 {
        self.hits.unwrap_or(1).max(1)
    }
}

/// Bonus multiplier against targets at or below a health fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finisher {
    pub threshold: f64,
    pub multiplier: f64,
}

impl Finisher {
    pub fn applies_to(&self, health_ratio: f64) -> bool {
        health_ratio <= self.threshold
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HealFormula {
    pub scaling: StatCoefficients,
    /// Removes every debuff from the target before healing.
    pub cleanse: bool,
    /// Recurring heal attached to the target.
    pub status: Option<StatusTemplate>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuffFormula {
    /// Statuses attached to each resolved target.
    pub effect: Vec<StatusTemplate>,
    pub self_status: Option<StatusTemplate>,
}
