//! Combat orchestration.
//!
//! Builds the actors of one battle from character and mission data, seeds
//! the random stream, runs the scheduler and computes rewards. Callers
//! persist the resulting deltas; nothing here is stored.

use std::collections::HashMap;

use crate::config::CombatConfig;
use crate::env::{CharacterProfile, Loadout, Mission, PcgRng, derive_seed};
use crate::error::SetupError;
use crate::rewards::{RewardResult, combat_rewards};
use crate::state::{AbilitySlotState, ActorId, ActorKind, ActorState};

use super::scheduler::{CombatOutcome, TurnScheduler};

/// Everything needed to simulate one battle.
#[derive(Clone, Copy, Debug)]
pub struct CombatRequest<'a> {
    pub character: &'a CharacterProfile,
    pub loadout: &'a Loadout,
    pub mission: &'a Mission,
    /// Milliseconds since the Unix epoch; feeds the seed.
    pub timestamp_ms: i64,
}

impl CombatRequest<'_> {
    pub fn seed(&self) -> u64 {
        derive_seed(self.timestamp_ms, &self.character.id, &self.mission.id)
    }
}

/// Outcome and rewards of one simulated battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatReport {
    pub seed: u64,
    pub outcome: CombatOutcome,
    pub rewards: RewardResult,
    pub character_remaining_health: u32,
    pub enemy_count: u32,
}

/// Builds the character's actor from its profile and loadout.
///
/// Ability slots are ordered by loadout slot index.
pub fn build_character_actor(character: &CharacterProfile, loadout: &Loadout) -> ActorState {
    let mut abilities: Vec<AbilitySlotState> = loadout
        .abilities
        .iter()
        .map(|entry| AbilitySlotState::new(entry.ability.clone(), entry.slot, entry.priority))
        .collect();
    abilities.sort_by_key(|slot| slot.slot);

    ActorState::new(
        ActorId::CHARACTER,
        character.name.clone(),
        ActorKind::Character,
        character.combat_stats(loadout),
        abilities,
    )
}

/// Instantiates every mission enemy, replicated per quantity.
///
/// Replicas of the same name get a numeric suffix beyond the first
/// (`"Goblin"`, `"Goblin 2"`, ...). Ids follow mission order from 1.
pub fn build_enemy_actors(mission: &Mission) -> Result<Vec<ActorState>, SetupError> {
    if mission.enemies.is_empty() {
        return Err(SetupError::NoEnemies {
            mission: mission.id.clone(),
        });
    }

    let mut seen: HashMap<&str, u32> = HashMap::new();
    let mut actors = Vec::new();
    for group in &mission.enemies {
        if group.quantity == 0 {
            return Err(SetupError::EmptyEnemyGroup {
                mission: mission.id.clone(),
                template: group.template.slug.clone(),
            });
        }

        let template = &group.template;
        let abilities: Vec<AbilitySlotState> = template
            .abilities
            .iter()
            .enumerate()
            .map(|(slot, entry)| {
                AbilitySlotState::new(entry.ability.clone(), slot as u32, entry.priority)
                    .with_weight(entry.weight)
            })
            .collect();

        for _ in 0..group.quantity {
            let count = seen.entry(template.name.as_str()).or_insert(0);
            *count += 1;
            let name = if *count == 1 {
                template.name.clone()
            } else {
                format!("{} {}", template.name, count)
            };

            let id = ActorId(actors.len() as u32 + 1);
            actors.push(ActorState::new(
                id,
                name,
                ActorKind::Enemy,
                template.base_stats,
                abilities.clone(),
            ));
        }
    }
    Ok(actors)
}

/// Simulates a battle seeded from the request's timestamp and identifiers.
pub fn start_combat(
    request: &CombatRequest<'_>,
    config: &CombatConfig,
) -> Result<CombatReport, SetupError> {
    start_combat_with_seed(request, request.seed(), config)
}

/// Simulates a battle from an explicit seed, e.g. to replay a recorded one.
pub fn start_combat_with_seed(
    request: &CombatRequest<'_>,
    seed: u64,
    config: &CombatConfig,
) -> Result<CombatReport, SetupError> {
    let enemies = build_enemy_actors(request.mission)?;
    let enemy_count = enemies.len() as u32;

    let mut actors = Vec::with_capacity(enemies.len() + 1);
    actors.push(build_character_actor(request.character, request.loadout));
    actors.extend(enemies);

    let mut rng = PcgRng::seeded(seed);
    let mut scheduler = TurnScheduler::new(actors, config, &mut rng);
    let outcome = scheduler.run();
    let character_remaining_health = scheduler
        .actors()
        .iter()
        .find(|actor| actor.kind == ActorKind::Character)
        .map_or(0, ActorState::current_health);
    drop(scheduler);

    let rewards = combat_rewards(request.mission, outcome.victory, outcome.rounds, &mut rng);

    Ok(CombatReport {
        seed,
        outcome,
        rewards,
        character_remaining_health,
        enemy_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityDefinition, AbilityFormula, StrikeFormula};
    use crate::env::{EnemyAbility, EnemyTemplate, LoadoutAbility, MissionEnemy};
    use crate::stats::StatBlock;

    fn mission(quantity: u32) -> Mission {
        Mission {
            id: "rat-cellar".into(),
            name: "Rat Cellar".into(),
            difficulty: 0,
            base_experience: 10,
            base_gold: 5,
            duration_minutes: 10,
            loot_table: Default::default(),
            enemies: vec![MissionEnemy {
                template: EnemyTemplate {
                    slug: "rat".into(),
                    name: "Rat".into(),
                    base_stats: StatBlock::new(10, 2, 0, 3, 0),
                    abilities: vec![EnemyAbility::new(
                        AbilityDefinition::new(
                            "bite",
                            "Bite",
                            AbilityFormula::Physical(StrikeFormula::default()),
                        )
                        .with_base_power(2),
                        0,
                    )],
                },
                quantity,
            }],
        }
    }

    #[test]
    fn replicas_get_suffixes_and_sequential_ids() {
        let actors = build_enemy_actors(&mission(3)).unwrap();
        let names: Vec<_> = actors.iter().map(|actor| actor.name.as_str()).collect();
        assert_eq!(names, vec!["Rat", "Rat 2", "Rat 3"]);
        let ids: Vec<_> = actors.iter().map(|actor| actor.id).collect();
        assert_eq!(ids, vec![ActorId(1), ActorId(2), ActorId(3)]);
    }

    #[test]
    fn empty_missions_are_rejected() {
        let mut empty = mission(1);
        empty.enemies.clear();
        assert!(matches!(
            build_enemy_actors(&empty),
            Err(SetupError::NoEnemies { .. })
        ));
        assert!(matches!(
            build_enemy_actors(&mission(0)),
            Err(SetupError::EmptyEnemyGroup { .. })
        ));
    }

    #[test]
    fn character_slots_follow_loadout_order() {
        let hero = CharacterProfile::new("hero", "Hero", StatBlock::new(50, 5, 1, 5, 0));
        let ability = |slug: &str| {
            AbilityDefinition::new(slug, slug, AbilityFormula::Physical(StrikeFormula::default()))
        };
        let loadout = Loadout {
            abilities: vec![
                LoadoutAbility {
                    slot: 2,
                    priority: 0,
                    ability: ability("late"),
                },
                LoadoutAbility {
                    slot: 0,
                    priority: 1,
                    ability: ability("early"),
                },
            ],
            equipment: Vec::new(),
        };
        let actor = build_character_actor(&hero, &loadout);
        assert_eq!(actor.id, ActorId::CHARACTER);
        assert_eq!(actor.abilities()[0].ability.slug, "early");
    }

    #[test]
    fn reports_count_enemies_and_remaining_health() {
        let hero = CharacterProfile::new("hero", "Hero", StatBlock::new(80, 30, 2, 9, 0));
        let loadout = Loadout {
            abilities: vec![LoadoutAbility {
                slot: 0,
                priority: 0,
                ability: AbilityDefinition::new(
                    "slash",
                    "Slash",
                    AbilityFormula::Physical(StrikeFormula::default()),
                )
                .with_base_power(30),
            }],
            equipment: Vec::new(),
        };
        let mission = mission(2);
        let request = CombatRequest {
            character: &hero,
            loadout: &loadout,
            mission: &mission,
            timestamp_ms: 1_700_000_000_000,
        };

        let report = start_combat(&request, &CombatConfig::default()).unwrap();
        assert!(report.outcome.victory);
        assert_eq!(report.enemy_count, 2);
        assert_eq!(report.seed, request.seed());
        assert!(report.character_remaining_health <= 80);
        assert!(report.character_remaining_health > 0);
    }
}
