use crate::env::CombatRng;
use crate::stats::StatBlock;
use crate::status::{AddOutcome, StatusCommand, StatusInstance, StatusLedger, StatusModifiers};

use super::abilities::{AbilitySlotState, select_slot};

/// Unique identifier for an actor within one battle.
///
/// The character is always `ActorId(0)`; enemies follow in mission order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActorId(pub u32);

impl ActorId {
    pub const CHARACTER: Self = Self(0);
}

impl core::fmt::Display for ActorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side an actor fights on.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActorKind {
    Character,
    Enemy,
}

impl ActorKind {
    pub fn is_opponent_of(self, other: ActorKind) -> bool {
        self != other
    }
}

/// Split of one damage application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageTaken {
    /// Soaked by shield pools.
    pub absorbed: u32,
    /// Actually removed from health.
    pub dealt: u32,
}

/// Health change caused by a status at the start of its owner's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusTick {
    Damage { source: String, taken: DamageTaken },
    Heal { source: String, amount: u32 },
}

/// What happened when an actor's turn began.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnOpening {
    pub ticks: Vec<StatusTick>,
    /// Status that prevents acting this turn, if any.
    pub prevented_by: Option<String>,
}

/// One combatant inside a single battle.
///
/// # Invariants
///
/// - `current_health` stays within `[0, max_health]` after every mutation
/// - `stats` never change after creation; statuses only alter the
///   [`effective_stats`](Self::effective_stats) view
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    stats: StatBlock,
    current_health: u32,
    abilities: Vec<AbilitySlotState>,
    statuses: StatusLedger,
}

impl ActorState {
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        kind: ActorKind,
        stats: StatBlock,
        abilities: Vec<AbilitySlotState>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            stats,
            current_health: stats.health,
            abilities,
            statuses: StatusLedger::new(),
        }
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn max_health(&self) -> u32 {
        self.stats.health
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Current over maximum health; an actor with zero max health reads as 0.
    pub fn health_ratio(&self) -> f64 {
        if self.stats.health == 0 {
            return 0.0;
        }
        f64::from(self.current_health) / f64::from(self.stats.health)
    }

    pub fn abilities(&self) -> &[AbilitySlotState] {
        &self.abilities
    }

    pub fn ability(&self, index: usize) -> Option<&AbilitySlotState> {
        self.abilities.get(index)
    }

    pub fn statuses(&self) -> &StatusLedger {
        &self.statuses
    }

    pub fn modifiers(&self) -> StatusModifiers {
        self.statuses.modifiers()
    }

    /// Base stats with every active status applied.
    pub fn effective_stats(&self) -> StatBlock {
        self.statuses.modifiers().apply(&self.stats)
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Drains shields first, then removes the rest from health (floor 0).
    pub fn take_damage(&mut self, amount: u32) -> DamageTaken {
        let split = self.statuses.absorb(amount);
        let dealt = split.passed_through.min(self.current_health);
        self.current_health -= dealt;
        DamageTaken {
            absorbed: split.absorbed,
            dealt,
        }
    }

    /// Restores health up to the maximum and returns the applied amount.
    ///
    /// Fallen actors cannot be healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let missing = self.stats.health - self.current_health;
        let applied = amount.min(missing);
        self.current_health += applied;
        applied
    }

    // ========================================================================
    // Statuses
    // ========================================================================

    pub fn add_status(&mut self, instance: StatusInstance) -> AddOutcome {
        self.statuses.add(instance)
    }

    /// Removes debuff-tagged statuses and returns their names.
    pub fn cleanse(&mut self) -> Vec<String> {
        self.statuses.cleanse()
    }

    /// Applies turn-start status commands in attachment order.
    ///
    /// Stops applying once the actor falls; a fallen actor is never
    /// reported as prevented.
    pub fn begin_turn(&mut self) -> TurnOpening {
        let start = self.statuses.tick_start();
        let mut opening = TurnOpening::default();

        for command in start.commands {
            if !self.is_alive() {
                break;
            }
            match command {
                StatusCommand::Damage { source, amount } => {
                    let taken = self.take_damage(amount);
                    opening.ticks.push(StatusTick::Damage { source, taken });
                }
                StatusCommand::Heal { source, amount } => {
                    let amount = self.heal(amount);
                    opening.ticks.push(StatusTick::Heal { source, amount });
                }
            }
        }

        if self.is_alive() {
            opening.prevented_by = start.prevented_by;
        }
        opening
    }

    /// Counts statuses down and returns the names that expired.
    pub fn end_turn(&mut self) -> Vec<String> {
        self.statuses.tick()
    }

    // ========================================================================
    // Abilities
    // ========================================================================

    pub fn select_ability(&self, rng: &mut (impl CombatRng + ?Sized)) -> Option<usize> {
        select_slot(&self.abilities, rng)
    }

    /// Puts the used slot on cooldown and counts every other slot down.
    pub fn commit_ability(&mut self, index: usize) {
        for (slot_index, slot) in self.abilities.iter_mut().enumerate() {
            if slot_index == index {
                slot.trigger();
            } else {
                slot.tick();
            }
        }
    }

    /// Counts every slot down by one (used when the turn is prevented).
    pub fn tick_cooldowns(&mut self) {
        for slot in &mut self.abilities {
            slot.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityDefinition, AbilityFormula, StrikeFormula};
    use crate::status::{StatusEffectKind, StatusTemplate};

    fn actor(health: u32) -> ActorState {
        ActorState::new(
            ActorId(1),
            "Slime",
            ActorKind::Enemy,
            StatBlock::new(health, 5, 2, 3, 0),
            Vec::new(),
        )
    }

    fn status(name: &str, duration: u32, effect: StatusEffectKind) -> StatusInstance {
        StatusTemplate::new(name, duration, effect).instantiate()
    }

    #[test]
    fn damage_and_heal_stay_within_bounds() {
        let mut slime = actor(50);
        assert_eq!(slime.take_damage(20).dealt, 20);
        assert_eq!(slime.heal(100), 20);
        assert_eq!(slime.current_health(), 50);
        assert_eq!(slime.take_damage(500).dealt, 50);
        assert_eq!(slime.current_health(), 0);
        assert!(!slime.is_alive());
        assert_eq!(slime.heal(10), 0);
    }

    #[test]
    fn shields_soak_damage_first() {
        let mut slime = actor(50);
        slime.add_status(status("ward", 2, StatusEffectKind::Shield(15)));
        assert_eq!(
            slime.take_damage(20),
            DamageTaken {
                absorbed: 15,
                dealt: 5
            }
        );
        assert_eq!(slime.current_health(), 45);
    }

    #[test]
    fn begin_turn_applies_dot_and_reports_prevention() {
        let mut slime = actor(50);
        slime.add_status(status("poison", 3, StatusEffectKind::DamagePerTurn(7)));
        slime.add_status(status("stun", 1, StatusEffectKind::SkipTurn));

        let opening = slime.begin_turn();
        assert_eq!(slime.current_health(), 43);
        assert_eq!(opening.prevented_by.as_deref(), Some("stun"));
        assert_eq!(slime.end_turn(), vec!["stun".to_string()]);
        assert_eq!(slime.begin_turn().prevented_by, None);
    }

    #[test]
    fn lethal_dot_stops_further_ticks() {
        let mut slime = actor(5);
        slime.add_status(status("poison", 3, StatusEffectKind::DamagePerTurn(9)));
        slime.add_status(status("renew", 3, StatusEffectKind::HealPerTurn(9)));
        slime.add_status(status("stun", 1, StatusEffectKind::SkipTurn));

        let opening = slime.begin_turn();
        assert_eq!(opening.ticks.len(), 1);
        assert_eq!(opening.prevented_by, None);
        assert!(!slime.is_alive());
    }

    #[test]
    fn commit_sets_cooldown_and_ticks_others() {
        let strike = |slug: &str, cooldown| {
            AbilityDefinition::new(slug, slug, AbilityFormula::Physical(StrikeFormula::default()))
                .with_cooldown(cooldown)
        };
        let mut hero = ActorState::new(
            ActorId::CHARACTER,
            "Hero",
            ActorKind::Character,
            StatBlock::new(100, 10, 5, 5, 0),
            vec![
                AbilitySlotState::new(strike("smash", 2), 0, 0),
                AbilitySlotState::new(strike("jab", 0), 1, 1),
            ],
        );

        let mut rng = || 0.0;
        assert_eq!(hero.select_ability(&mut rng), Some(0));
        hero.commit_ability(0);
        assert_eq!(hero.select_ability(&mut rng), Some(1));
        hero.commit_ability(1);
        assert_eq!(hero.abilities()[0].cooldown_remaining(), 1);
        hero.tick_cooldowns();
        assert_eq!(hero.select_ability(&mut rng), Some(0));
    }

    #[test]
    fn effective_stats_reflect_statuses() {
        let mut slime = actor(50);
        slime.add_status(status(
            "weaken",
            2,
            StatusEffectKind::StatModifiers(crate::stats::StatDelta {
                attack: -3,
                ..Default::default()
            }),
        ));
        assert_eq!(slime.effective_stats().attack, 2);
        assert_eq!(slime.stats().attack, 5);
    }
}
