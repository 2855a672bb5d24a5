//! Per-actor collection of active status effects.
//!
//! The ledger never touches actor health. Turn-start effects come back as
//! [`StatusCommand`]s which the owning actor applies with its own clamping,
//! so the ledger can be exercised in isolation.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::stats::{StatBlock, StatDelta, StatKind, StatMultipliers};

use super::template::{StatusEffectKind, StatusInstance};

/// Result of attaching a status instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddOutcome {
    /// No status of that name was active; the instance was appended.
    New,
    /// An existing status of that name was refreshed.
    Merged,
    /// The ledger is full and the status was not attached.
    Dropped,
}

/// Health change requested by a status at the start of its owner's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusCommand {
    Damage { source: String, amount: u32 },
    Heal { source: String, amount: u32 },
}

/// Everything the ledger reports when its owner's turn begins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnStart {
    pub commands: Vec<StatusCommand>,
    /// Name of the first active status that prevents acting.
    pub prevented_by: Option<String>,
}

impl TurnStart {
    pub fn is_prevented(&self) -> bool {
        self.prevented_by.is_some()
    }
}

/// Folded view of all active effects.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusModifiers {
    pub damage_multiplier: f64,
    pub incoming_damage_multiplier: f64,
    pub speed_multiplier: f64,
    pub shield_remaining: u32,
    pub offsets: StatDelta,
    pub scale: StatMultipliers,
}

impl Default for StatusModifiers {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            incoming_damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            shield_remaining: 0,
            offsets: StatDelta::ZERO,
            scale: StatMultipliers::NEUTRAL,
        }
    }
}

impl StatusModifiers {
    /// Applies offsets then multipliers to every combat stat.
    ///
    /// `health` is left untouched: maximum health is fixed at actor creation.
    pub fn apply(&self, base: &StatBlock) -> StatBlock {
        let mut effective = *base;
        for kind in StatKind::ALL {
            if kind == StatKind::Health {
                continue;
            }
            let offset = i64::from(base.get(kind)).saturating_add(self.offsets.get(kind));
            let value = (offset as f64 * self.scale.get(kind)).round();
            effective.set(kind, value.clamp(0.0, f64::from(u32::MAX)) as u32);
        }
        effective
    }
}

/// Damage split by [`StatusLedger::absorb`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Absorbed {
    pub absorbed: u32,
    pub passed_through: u32,
}

/// Active status effects on one actor.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusLedger {
    effects: ArrayVec<StatusInstance, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an instance, refreshing an existing one of the same name.
    pub fn add(&mut self, instance: StatusInstance) -> AddOutcome {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.name == instance.name) {
            existing.refresh(&instance);
            return AddOutcome::Merged;
        }

        match self.effects.try_push(instance) {
            Ok(()) => AddOutcome::New,
            Err(_) => AddOutcome::Dropped,
        }
    }

    /// Collects turn-start commands in attachment order.
    pub fn tick_start(&self) -> TurnStart {
        let mut start = TurnStart::default();
        for effect in &self.effects {
            match effect.effect {
                StatusEffectKind::DamagePerTurn(amount) => {
                    start.commands.push(StatusCommand::Damage {
                        source: effect.name.clone(),
                        amount,
                    });
                }
                StatusEffectKind::HealPerTurn(amount) => {
                    start.commands.push(StatusCommand::Heal {
                        source: effect.name.clone(),
                        amount,
                    });
                }
                StatusEffectKind::SkipTurn if start.prevented_by.is_none() => {
                    start.prevented_by = Some(effect.name.clone());
                }
                _ => {}
            }
        }
        start
    }

    /// Counts every instance down by one and removes the expired ones.
    ///
    /// Returns the names of removed instances in attachment order.
    pub fn tick(&mut self) -> Vec<String> {
        let mut expired = Vec::new();
        for effect in &mut self.effects {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        self.effects.retain(|effect| {
            if effect.remaining == 0 {
                expired.push(effect.name.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Folds all active effects into scalar factors.
    pub fn modifiers(&self) -> StatusModifiers {
        let mut folded = StatusModifiers::default();
        for effect in &self.effects {
            match &effect.effect {
                StatusEffectKind::StatModifiers(delta) => {
                    for kind in StatKind::ALL {
                        let sum = folded.offsets.get(kind).saturating_add(delta.get(kind));
                        folded.offsets.set(kind, sum);
                    }
                }
                StatusEffectKind::StatMultipliers(scale) => {
                    folded.scale = folded.scale.combine(scale);
                }
                StatusEffectKind::Shield(pool) => {
                    folded.shield_remaining = folded.shield_remaining.saturating_add(*pool);
                }
                _ => {}
            }
        }
        folded.damage_multiplier = folded.scale.damage_dealt;
        folded.incoming_damage_multiplier = folded.scale.damage_taken;
        folded.speed_multiplier = folded.scale.speed;
        folded
    }

    /// Drains shield pools in attachment order.
    ///
    /// Depleted shields stay attached until they expire.
    pub fn absorb(&mut self, damage: u32) -> Absorbed {
        let mut remaining = damage;
        for effect in &mut self.effects {
            if remaining == 0 {
                break;
            }
            if let StatusEffectKind::Shield(pool) = &mut effect.effect {
                let taken = (*pool).min(remaining);
                *pool -= taken;
                remaining -= taken;
            }
        }
        Absorbed {
            absorbed: damage - remaining,
            passed_through: remaining,
        }
    }

    /// Removes every debuff-tagged instance and returns their names.
    pub fn cleanse(&mut self) -> Vec<String> {
        let mut removed = Vec::new();
        self.effects.retain(|effect| {
            if effect.debuff {
                removed.push(effect.name.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Removes a status by name. Absent names are a no-op.
    pub fn remove(&mut self, name: &str) -> Option<StatusInstance> {
        let index = self.effects.iter().position(|e| e.name == name)?;
        Some(self.effects.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&StatusInstance> {
        self.effects.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusInstance> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusTemplate;

    fn instance(name: &str, duration: u32, effect: StatusEffectKind) -> StatusInstance {
        StatusTemplate::new(name, duration, effect).instantiate()
    }

    #[test]
    fn add_reports_new_then_merged() {
        let mut ledger = StatusLedger::new();
        let burn = instance("burn", 2, StatusEffectKind::DamagePerTurn(3));
        assert_eq!(ledger.add(burn.clone()), AddOutcome::New);
        assert_eq!(ledger.add(burn), AddOutcome::Merged);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn full_ledger_drops_new_names_but_still_merges() {
        let mut ledger = StatusLedger::new();
        for i in 0..CombatConfig::MAX_STATUS_EFFECTS {
            let name = format!("mark-{i}");
            assert_eq!(
                ledger.add(instance(&name, 3, StatusEffectKind::Shield(1))),
                AddOutcome::New
            );
        }
        assert_eq!(
            ledger.add(instance("overflow", 3, StatusEffectKind::SkipTurn)),
            AddOutcome::Dropped
        );
        assert_eq!(
            ledger.add(instance("mark-0", 9, StatusEffectKind::Shield(5))),
            AddOutcome::Merged
        );
        assert_eq!(ledger.get("mark-0").map(|e| e.remaining), Some(9));
    }

    #[test]
    fn tick_start_reports_commands_and_prevention() {
        let mut ledger = StatusLedger::new();
        ledger.add(instance("poison", 3, StatusEffectKind::DamagePerTurn(4)));
        ledger.add(instance("renew", 3, StatusEffectKind::HealPerTurn(6)));
        ledger.add(instance("stun", 1, StatusEffectKind::SkipTurn));

        let start = ledger.tick_start();
        assert_eq!(
            start.commands,
            vec![
                StatusCommand::Damage {
                    source: "poison".into(),
                    amount: 4
                },
                StatusCommand::Heal {
                    source: "renew".into(),
                    amount: 6
                },
            ]
        );
        assert_eq!(start.prevented_by.as_deref(), Some("stun"));
        assert_eq!(ledger.len(), 3, "tick_start never mutates");
    }

    #[test]
    fn tick_counts_down_and_expires() {
        let mut ledger = StatusLedger::new();
        ledger.add(instance("stun", 1, StatusEffectKind::SkipTurn));
        ledger.add(instance("poison", 2, StatusEffectKind::DamagePerTurn(4)));

        assert_eq!(ledger.tick(), vec!["stun".to_string()]);
        assert_eq!(ledger.get("poison").map(|e| e.remaining), Some(1));
        assert_eq!(ledger.tick(), vec!["poison".to_string()]);
        assert!(ledger.is_empty());
        assert!(ledger.tick().is_empty());
    }

    #[test]
    fn modifiers_fold_offsets_and_multipliers() {
        let mut ledger = StatusLedger::new();
        ledger.add(instance(
            "fortify",
            3,
            StatusEffectKind::StatModifiers(StatDelta {
                defense: 10,
                ..StatDelta::ZERO
            }),
        ));
        ledger.add(instance(
            "haste",
            3,
            StatusEffectKind::StatMultipliers(StatMultipliers {
                speed: 1.5,
                damage_taken: 0.8,
                ..StatMultipliers::NEUTRAL
            }),
        ));
        ledger.add(instance("ward", 3, StatusEffectKind::Shield(25)));

        let mods = ledger.modifiers();
        assert_eq!(mods.speed_multiplier, 1.5);
        assert_eq!(mods.incoming_damage_multiplier, 0.8);
        assert_eq!(mods.damage_multiplier, 1.0);
        assert_eq!(mods.shield_remaining, 25);

        let effective = mods.apply(&StatBlock::new(100, 10, 6, 8, 0));
        assert_eq!(effective, StatBlock::new(100, 10, 16, 12, 0));
    }

    #[test]
    fn absorb_drains_shields_in_order() {
        let mut ledger = StatusLedger::new();
        ledger.add(instance("ward", 3, StatusEffectKind::Shield(10)));
        ledger.add(instance("aegis", 3, StatusEffectKind::Shield(5)));

        assert_eq!(
            ledger.absorb(12),
            Absorbed {
                absorbed: 12,
                passed_through: 0
            }
        );
        assert_eq!(
            ledger.absorb(8),
            Absorbed {
                absorbed: 3,
                passed_through: 5
            }
        );
        assert_eq!(ledger.modifiers().shield_remaining, 0);
    }

    #[test]
    fn cleanse_removes_only_debuffs() {
        let mut ledger = StatusLedger::new();
        ledger.add(instance("poison", 3, StatusEffectKind::DamagePerTurn(2)));
        ledger.add(instance("ward", 3, StatusEffectKind::Shield(10)));
        ledger.add(instance("stun", 1, StatusEffectKind::SkipTurn));

        assert_eq!(ledger.cleanse(), vec!["poison".to_string(), "stun".to_string()]);
        assert!(ledger.contains("ward"));
        assert_eq!(ledger.remove("missing"), None);
    }
}
