//! Ability resolution.
//!
//! [`resolve`] dispatches on the ability's formula and mutates the actors in
//! place, returning the log entries in resolution order. The first entry is
//! always either `Ability` (followed by its mechanical entries) or `Skip`
//! when there was nothing to act on.

use crate::ability::{AbilityDefinition, AbilityFormula, BuffFormula, HealFormula, StrikeFormula};
use crate::env::CombatRng;
use crate::state::{ActorId, ActorState};
use crate::status::{AddOutcome, StatusTemplate};

use super::damage::{ability_power, hit_damage, roll_variance, to_amount};
use super::log::{LogAction, LogEntry};
use super::targeting::Target;

/// Shared context of one ability use.
struct Resolution<'a, R: CombatRng + ?Sized> {
    ability: &'a AbilityDefinition,
    caster: usize,
    round: u32,
    rng: &'a mut R,
    log: Vec<LogEntry>,
}

impl<R: CombatRng + ?Sized> Resolution<'_, R> {
    fn entry(&self, actors: &[ActorState], action: LogAction) -> LogEntry {
        let actor = actors
            .get(self.caster)
            .map_or(ActorId::default(), |caster| caster.id);
        LogEntry::new(self.round, actor, action).ability(self.ability.name.as_str())
    }

    /// Rolls a status template onto `target` and logs it when it lands.
    ///
    /// The chance roll always consumes a draw.
    fn apply_status(&mut self, template: &StatusTemplate, target: usize, actors: &mut [ActorState]) {
        if !self.rng.chance(template.chance) {
            return;
        }
        let entry = self.entry(actors, LogAction::Buff);
        let Some(actor) = actors.get_mut(target) else {
            return;
        };
        if !actor.is_alive() {
            return;
        }
        if actor.add_status(template.instantiate()) != AddOutcome::Dropped {
            self.log.push(
                entry
                    .target(actor.id)
                    .status(template.name.as_str())
                    .value(template.effect.magnitude()),
            );
        }
    }

    fn strike(&mut self, formula: &StrikeFormula, targets: &[usize], actors: &mut [ActorState]) {
        let Some(caster) = actors.get(self.caster) else {
            return;
        };
        let base = ability_power(
            self.ability.base_power,
            &formula.scaling,
            &caster.effective_stats(),
        );
        let power = roll_variance(base, formula.variance, &mut *self.rng)
            * caster.modifiers().damage_multiplier;

        let mut dealt_total = 0u64;
        for &index in targets {
            for _ in 0..formula.hit_count() {
                let absorb = self.entry(actors, LogAction::Absorb);
                let damage = self.entry(actors, LogAction::Damage);
                let Some(target) = actors.get_mut(index) else {
                    break;
                };
                if !target.is_alive() {
                    break;
                }
                let amount = hit_damage(
                    power,
                    target.effective_stats().defense,
                    target.health_ratio(),
                    formula.finisher.as_ref(),
                    target.modifiers().incoming_damage_multiplier,
                );
                let taken = target.take_damage(amount);
                if taken.absorbed > 0 {
                    self.log.push(absorb.target(target.id).value(taken.absorbed));
                }
                self.log.push(damage.target(target.id).value(taken.dealt));
                dealt_total += u64::from(taken.dealt);
            }

            if let Some(status) = &formula.status {
                if actors.get(index).is_some_and(ActorState::is_alive) {
                    self.apply_status(status, index, actors);
                }
            }
        }

        if let Some(fraction) = formula.life_steal {
            let amount = to_amount(dealt_total as f64 * fraction);
            if amount > 0 {
                let entry = self.entry(actors, LogAction::Heal);
                if let Some(caster) = actors.get_mut(self.caster) {
                    let applied = caster.heal(amount);
                    self.log.push(entry.target(caster.id).value(applied));
                }
            }
        }

        if let Some(status) = &formula.self_status {
            self.apply_status(status, self.caster, actors);
        }
    }

    fn heal(&mut self, formula: &HealFormula, targets: &[usize], actors: &mut [ActorState]) {
        let Some(caster) = actors.get(self.caster) else {
            return;
        };
        let amount = to_amount(ability_power(
            self.ability.base_power,
            &formula.scaling,
            &caster.effective_stats(),
        ));

        for &index in targets {
            let expire = self.entry(actors, LogAction::StatusExpire);
            let heal = self.entry(actors, LogAction::Heal);
            let Some(target) = actors.get_mut(index) else {
                continue;
            };
            if formula.cleanse {
                for name in target.cleanse() {
                    self.log.push(expire.clone().target(target.id).status(name));
                }
            }
            let applied = target.heal(amount);
            self.log.push(heal.target(target.id).value(applied));

            if let Some(status) = &formula.status {
                self.apply_status(status, index, actors);
            }
        }
    }

    fn buff(&mut self, formula: &BuffFormula, targets: &[usize], actors: &mut [ActorState]) {
        for &index in targets {
            for template in &formula.effect {
                self.apply_status(template, index, actors);
            }
        }
        if let Some(status) = &formula.self_status {
            self.apply_status(status, self.caster, actors);
        }
    }
}

/// Resolves one ability use by `caster` against `target`.
pub fn resolve(
    ability: &AbilityDefinition,
    caster: usize,
    target: &Target,
    actors: &mut [ActorState],
    round: u32,
    rng: &mut (impl CombatRng + ?Sized),
) -> Vec<LogEntry> {
    let mut resolution = Resolution {
        ability,
        caster,
        round,
        rng,
        log: Vec::new(),
    };

    if target.is_none() {
        let skip = resolution.entry(actors, LogAction::Skip);
        return vec![skip];
    }

    let mut opening = resolution.entry(actors, LogAction::Ability);
    if let Target::Single(index) = target {
        if let Some(actor) = actors.get(*index) {
            opening = opening.target(actor.id);
        }
    }
    resolution.log.push(opening);

    let targets = target.indices();
    match &ability.formula {
        AbilityFormula::Physical(strike) | AbilityFormula::Magical(strike) => {
            resolution.strike(strike, targets, actors);
        }
        AbilityFormula::Healing(heal) => resolution.heal(heal, targets, actors),
        AbilityFormula::Buff(buff) => resolution.buff(buff, targets, actors),
    }
    resolution.log
}
