//! Status templates and their live instances.

use crate::stats::{StatDelta, StatKind, StatMultipliers};

/// The single mechanical effect a status carries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Damage applied at the start of each of the owner's turns.
    DamagePerTurn(u32),
    /// Healing applied at the start of each of the owner's turns.
    HealPerTurn(u32),
    /// Additive stat offsets.
    StatModifiers(StatDelta),
    /// Multiplicative stat and damage factors.
    StatMultipliers(StatMultipliers),
    /// Owner loses its action while active (stun, freeze).
    SkipTurn,
    /// Absorbs incoming damage until the pool is drained.
    Shield(u32),
}

impl StatusEffectKind {
    /// Whether this effect harms its owner regardless of the debuff tag.
    pub fn is_harmful(&self) -> bool {
        match self {
            Self::DamagePerTurn(_) | Self::SkipTurn => true,
            Self::StatModifiers(delta) => StatKind::ALL.iter().any(|&kind| delta.get(kind) < 0),
            Self::StatMultipliers(scale) => {
                StatKind::ALL.iter().any(|&kind| scale.get(kind) < 1.0)
                    || scale.damage_dealt < 1.0
                    || scale.damage_taken > 1.0
            }
            Self::HealPerTurn(_) | Self::Shield(_) => false,
        }
    }

    /// Representative magnitude for logging.
    pub fn magnitude(&self) -> u32 {
        match self {
            Self::DamagePerTurn(amount) | Self::HealPerTurn(amount) | Self::Shield(amount) => {
                *amount
            }
            Self::StatModifiers(delta) => StatKind::ALL
                .iter()
                .map(|&kind| delta.get(kind).unsigned_abs())
                .max()
                .unwrap_or(0)
                .min(u64::from(u32::MAX)) as u32,
            Self::StatMultipliers(_) | Self::SkipTurn => 0,
        }
    }

    /// Raises this effect's magnitude to the larger of the two.
    ///
    /// Effects of a different kind leave `self` untouched.
    fn reinforce(&mut self, incoming: &Self) {
        match (self, incoming) {
            (Self::DamagePerTurn(current), Self::DamagePerTurn(new))
            | (Self::HealPerTurn(current), Self::HealPerTurn(new))
            | (Self::Shield(current), Self::Shield(new)) => {
                *current = (*current).max(*new);
            }
            (Self::StatModifiers(current), Self::StatModifiers(new)) => {
                for kind in StatKind::ALL {
                    let (old, candidate) = (current.get(kind), new.get(kind));
                    if candidate.unsigned_abs() > old.unsigned_abs() {
                        current.set(kind, candidate);
                    }
                }
            }
            (Self::StatMultipliers(current), Self::StatMultipliers(new)) => {
                *current = current.strongest(new);
            }
            _ => {}
        }
    }
}

/// Immutable description of a status an ability can apply.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTemplate {
    pub name: String,
    /// Number of the owner's turns the status stays active.
    pub duration: u32,
    /// Probability in `[0, 1]` that an application lands.
    #[cfg_attr(feature = "serde", serde(default = "StatusTemplate::default_chance"))]
    pub chance: f64,
    /// Marks the status as removable by cleansing heals.
    #[cfg_attr(feature = "serde", serde(default))]
    pub debuff: bool,
    pub effect: StatusEffectKind,
}

impl StatusTemplate {
    pub fn new(name: impl Into<String>, duration: u32, effect: StatusEffectKind) -> Self {
        Self {
            name: name.into(),
            duration,
            chance: Self::default_chance(),
            debuff: false,
            effect,
        }
    }

    #[must_use]
    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = chance;
        self
    }

    #[must_use]
    pub fn as_debuff(mut self) -> Self {
        self.debuff = true;
        self
    }

    fn default_chance() -> f64 {
        1.0
    }

    /// Explicitly tagged debuffs plus inherently harmful effects.
    pub fn is_debuff(&self) -> bool {
        self.debuff || self.effect.is_harmful()
    }

    pub fn instantiate(&self) -> StatusInstance {
        StatusInstance {
            name: self.name.clone(),
            remaining: self.duration,
            debuff: self.is_debuff(),
            effect: self.effect.clone(),
        }
    }
}

/// A status attached to an actor with its countdown.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub name: String,
    pub remaining: u32,
    pub debuff: bool,
    pub effect: StatusEffectKind,
}

impl StatusInstance {
    /// Merges a re-application of the same status.
    ///
    /// Duration becomes the longer of the two and magnitude the larger;
    /// neither ever decreases.
    pub fn refresh(&mut self, incoming: &StatusInstance) {
        self.remaining = self.remaining.max(incoming.remaining);
        self.debuff |= incoming.debuff;
        self.effect.reinforce(&incoming.effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poison(duration: u32, damage: u32) -> StatusInstance {
        StatusTemplate::new("poison", duration, StatusEffectKind::DamagePerTurn(damage))
            .instantiate()
    }

    #[test]
    fn refresh_takes_longer_duration_and_larger_magnitude() {
        let mut existing = poison(3, 4);
        existing.refresh(&poison(1, 9));
        assert_eq!(existing.remaining, 3);
        assert_eq!(existing.effect, StatusEffectKind::DamagePerTurn(9));

        existing.refresh(&poison(5, 2));
        assert_eq!(existing.remaining, 5);
        assert_eq!(existing.effect, StatusEffectKind::DamagePerTurn(9));
    }

    #[test]
    fn refresh_never_decreases_stat_offsets() {
        let weaken = |attack| StatusInstance {
            name: "weaken".into(),
            remaining: 2,
            debuff: true,
            effect: StatusEffectKind::StatModifiers(StatDelta {
                attack,
                ..StatDelta::ZERO
            }),
        };
        let mut existing = weaken(-6);
        existing.refresh(&weaken(-2));
        assert_eq!(existing.effect, weaken(-6).effect);
        existing.refresh(&weaken(-8));
        assert_eq!(existing.effect, weaken(-8).effect);
    }

    #[test]
    fn harmful_effects_count_as_debuffs() {
        assert!(poison(1, 1).debuff);
        let stun = StatusTemplate::new("stun", 1, StatusEffectKind::SkipTurn);
        assert!(stun.is_debuff());
        let ward = StatusTemplate::new("ward", 2, StatusEffectKind::Shield(30));
        assert!(!ward.is_debuff());
        assert!(ward.clone().as_debuff().is_debuff());
    }

    #[test]
    fn mismatched_kinds_keep_existing_effect() {
        let mut existing = poison(2, 5);
        let shield = StatusTemplate::new("poison", 4, StatusEffectKind::Shield(50)).instantiate();
        existing.refresh(&shield);
        assert_eq!(existing.effect, StatusEffectKind::DamagePerTurn(5));
        assert_eq!(existing.remaining, 4);
    }
}
