//! Target selection heuristics.
//!
//! Targets are indices into the battle's actor slice. A side with no living
//! members yields [`Target::None`], which the resolver turns into a `Skip`.

use crate::ability::TargetKind;
use crate::env::CombatRng;
use crate::state::ActorState;

/// Resolved target of one ability use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    None,
    Single(usize),
    Area(Vec<usize>),
}

impl Target {
    pub fn indices(&self) -> &[usize] {
        match self {
            Self::None => &[],
            Self::Single(index) => core::slice::from_ref(index),
            Self::Area(indices) => indices,
        }
    }

    pub fn is_none(&self) -> bool {
        self.indices().is_empty()
    }
}

/// Picks the target(s) for an ability of the given kind.
///
/// Only enemy targeting consumes draws: one per threat tie.
pub fn select_target(
    kind: TargetKind,
    actor: usize,
    actors: &[ActorState],
    rng: &mut (impl CombatRng + ?Sized),
) -> Target {
    let Some(caster) = actors.get(actor) else {
        return Target::None;
    };

    match kind {
        TargetKind::SelfOnly => Target::Single(actor),
        TargetKind::Ally => most_injured_ally(caster, actors),
        TargetKind::Area => {
            let opponents: Vec<usize> = living_opponents(caster, actors).collect();
            if opponents.is_empty() {
                Target::None
            } else {
                Target::Area(opponents)
            }
        }
        TargetKind::Enemy => most_threatening_opponent(caster, actors, rng),
    }
}

fn living_opponents<'a>(
    caster: &'a ActorState,
    actors: &'a [ActorState],
) -> impl Iterator<Item = usize> + 'a {
    actors
        .iter()
        .enumerate()
        .filter(move |(_, other)| other.is_alive() && other.kind.is_opponent_of(caster.kind))
        .map(|(index, _)| index)
}

/// Lowest health ratio among living allies, the caster included.
/// The first in actor order wins ties.
fn most_injured_ally(caster: &ActorState, actors: &[ActorState]) -> Target {
    let mut best: Option<(usize, f64)> = None;
    for (index, ally) in actors.iter().enumerate() {
        if !ally.is_alive() || ally.kind != caster.kind {
            continue;
        }
        let ratio = ally.health_ratio();
        if best.is_none_or(|(_, lowest)| ratio < lowest) {
            best = Some((index, ratio));
        }
    }
    best.map_or(Target::None, |(index, _)| Target::Single(index))
}

/// Highest threat among living opponents.
///
/// Each tie with the current best consumes one draw; the challenger
/// replaces the incumbent when the draw is above 0.5.
fn most_threatening_opponent(
    caster: &ActorState,
    actors: &[ActorState],
    rng: &mut (impl CombatRng + ?Sized),
) -> Target {
    let mut best: Option<(usize, u64)> = None;
    for index in living_opponents(caster, actors) {
        let threat = actors[index].effective_stats().threat();
        best = match best {
            None => Some((index, threat)),
            Some((_, top)) if threat > top => Some((index, threat)),
            Some((_, top)) if threat == top && rng.next_f64() > 0.5 => Some((index, threat)),
            keep => keep,
        };
    }
    best.map_or(Target::None, |(index, _)| Target::Single(index))
}
