//! Round-based turn scheduler.
//!
//! ```text
//! RoundStart ──► Initiative ──► ActorTurn ×N ──► RoundEnd ──┐
//!     ▲                             │                       │
//!     └─────────────────────────────┼───────────────────────┘
//!                                   ▼
//!                               Complete
//! ```
//!
//! The battle ends as soon as one side has no living member, checked after
//! every status tick and every action, or when the round cap is reached.

use crate::combat::{LogAction, LogEntry, resolve, select_target};
use crate::config::CombatConfig;
use crate::env::CombatRng;
use crate::state::{ActorKind, ActorState, StatusTick};

/// Where the scheduler currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatPhase {
    RoundStart,
    Initiative,
    ActorTurn,
    RoundEnd,
    Complete,
}

/// Result of a finished battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub rounds: u32,
    pub victory: bool,
    pub log: Vec<LogEntry>,
}

/// Drives one battle to completion.
pub struct TurnScheduler<'a, R: CombatRng + ?Sized> {
    actors: Vec<ActorState>,
    rng: &'a mut R,
    round_cap: u32,
    phase: CombatPhase,
    round: u32,
    order: Vec<usize>,
    cursor: usize,
    log: Vec<LogEntry>,
}

impl<'a, R: CombatRng + ?Sized> TurnScheduler<'a, R> {
    pub fn new(actors: Vec<ActorState>, config: &CombatConfig, rng: &'a mut R) -> Self {
        Self {
            actors,
            rng,
            round_cap: config.round_cap,
            phase: CombatPhase::RoundStart,
            round: 0,
            order: Vec::new(),
            cursor: 0,
            log: Vec::new(),
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn actors(&self) -> &[ActorState] {
        &self.actors
    }

    pub fn into_actors(self) -> Vec<ActorState> {
        self.actors
    }

    /// Entries logged so far.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    fn side_alive(&self, kind: ActorKind) -> bool {
        self.actors
            .iter()
            .any(|actor| actor.kind == kind && actor.is_alive())
    }

    fn is_terminal(&self) -> bool {
        !self.side_alive(ActorKind::Character) || !self.side_alive(ActorKind::Enemy)
    }

    /// Victory iff every enemy is down and the character still stands.
    pub fn is_victory(&self) -> bool {
        self.side_alive(ActorKind::Character) && !self.side_alive(ActorKind::Enemy)
    }

    /// Advances by one phase (or one actor turn) and returns the new phase.
    pub fn step(&mut self) -> CombatPhase {
        self.phase = match self.phase {
            CombatPhase::RoundStart => self.start_round(),
            CombatPhase::Initiative => self.roll_initiative(),
            CombatPhase::ActorTurn => self.take_turn(),
            CombatPhase::RoundEnd => CombatPhase::RoundStart,
            CombatPhase::Complete => CombatPhase::Complete,
        };
        self.phase
    }

    /// Steps until the battle completes and hands back the outcome.
    pub fn run(&mut self) -> CombatOutcome {
        while self.step() != CombatPhase::Complete {}
        CombatOutcome {
            rounds: self.round,
            victory: self.is_victory(),
            log: std::mem::take(&mut self.log),
        }
    }

    fn start_round(&mut self) -> CombatPhase {
        if self.is_terminal() || self.round >= self.round_cap {
            return CombatPhase::Complete;
        }
        self.round += 1;
        CombatPhase::Initiative
    }

    /// Orders living actors by `effective speed + draw`, descending.
    fn roll_initiative(&mut self) -> CombatPhase {
        let mut rolls: Vec<(usize, f64)> = Vec::with_capacity(self.actors.len());
        for (index, actor) in self.actors.iter().enumerate() {
            if actor.is_alive() {
                let speed = f64::from(actor.effective_stats().speed);
                rolls.push((index, speed + self.rng.next_f64()));
            }
        }
        rolls.sort_by(|a, b| b.1.total_cmp(&a.1));

        self.order = rolls.into_iter().map(|(index, _)| index).collect();
        self.cursor = 0;
        if self.order.is_empty() {
            CombatPhase::RoundEnd
        } else {
            CombatPhase::ActorTurn
        }
    }

    fn take_turn(&mut self) -> CombatPhase {
        let Some(&index) = self.order.get(self.cursor) else {
            return CombatPhase::RoundEnd;
        };
        self.cursor += 1;

        if self.act(index) && self.is_terminal() {
            return CombatPhase::Complete;
        }
        if self.cursor >= self.order.len() {
            CombatPhase::RoundEnd
        } else {
            CombatPhase::ActorTurn
        }
    }

    /// Runs one actor's turn. Returns false when the actor was already down.
    fn act(&mut self, index: usize) -> bool {
        let round = self.round;
        let Some(actor) = self.actors.get_mut(index) else {
            return false;
        };
        if !actor.is_alive() {
            return false;
        }
        let id = actor.id;

        let opening = actor.begin_turn();
        for tick in opening.ticks {
            match tick {
                StatusTick::Damage { source, taken } => {
                    if taken.absorbed > 0 {
                        self.log.push(
                            LogEntry::new(round, id, LogAction::Absorb)
                                .target(id)
                                .status(source.as_str())
                                .value(taken.absorbed),
                        );
                    }
                    self.log.push(
                        LogEntry::new(round, id, LogAction::StatusDamage)
                            .target(id)
                            .status(source)
                            .value(taken.dealt),
                    );
                }
                StatusTick::Heal { source, amount } => {
                    self.log.push(
                        LogEntry::new(round, id, LogAction::StatusHeal)
                            .target(id)
                            .status(source)
                            .value(amount),
                    );
                }
            }
        }

        let still_standing = self.actors.get(index).is_some_and(ActorState::is_alive);
        if !still_standing || self.is_terminal() {
            return true;
        }

        if let Some(status) = opening.prevented_by {
            self.log
                .push(LogEntry::new(round, id, LogAction::Skip).status(status));
            if let Some(actor) = self.actors.get_mut(index) {
                actor.tick_cooldowns();
            }
        } else {
            self.use_ability(index, round);
        }

        if let Some(actor) = self.actors.get_mut(index) {
            for name in actor.end_turn() {
                self.log.push(
                    LogEntry::new(round, id, LogAction::StatusExpire)
                        .target(id)
                        .status(name),
                );
            }
        }
        true
    }

    fn use_ability(&mut self, index: usize, round: u32) {
        let Some(actor) = self.actors.get(index) else {
            return;
        };
        let id = actor.id;
        let Some(slot) = actor.select_ability(&mut *self.rng) else {
            self.log.push(LogEntry::new(round, id, LogAction::Skip));
            return;
        };
        let Some(ability) = actor.ability(slot).map(|state| state.ability.clone()) else {
            return;
        };

        let target = select_target(ability.target, index, &self.actors, &mut *self.rng);
        let entries = resolve(&ability, index, &target, &mut self.actors, round, &mut *self.rng);
        self.log.extend(entries);

        if let Some(actor) = self.actors.get_mut(index) {
            actor.commit_ability(slot);
        }
    }
}
