//! Subcommand handlers. Each returns a JSON-serializable report.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use game_content::ContentCatalog;
use game_core::{level_from_xp, xp_for_level};
use runtime::{CombatResolution, IdleClaim, Runtime};

#[derive(Debug, Serialize)]
pub struct LevelReport {
    pub level: u32,
    pub experience: u64,
    pub next_level_at: u64,
}

#[derive(Debug, Serialize)]
pub struct MissionSummary {
    pub id: String,
    pub name: String,
    pub difficulty: u32,
    pub enemies: u32,
    pub power: u32,
}

pub fn fight(
    runtime: &Runtime,
    hero: &str,
    mission: &str,
    timestamp: Option<i64>,
    seed: Option<u64>,
    repeat: u32,
) -> Result<Vec<CombatResolution>> {
    if repeat == 0 {
        bail!("--repeat must be at least 1");
    }
    let start = match timestamp {
        Some(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
            .with_context(|| format!("timestamp {ms} is out of range"))?,
        None => Utc::now(),
    };

    let combat = runtime.combat();
    (0..repeat)
        .map(|offset| {
            let at = start + Duration::milliseconds(i64::from(offset));
            let resolution = match seed {
                Some(seed) => combat.run_with_seed(hero, mission, at, seed),
                None => combat.run(hero, mission, at),
            };
            resolution.with_context(|| format!("fight {hero} vs {mission}"))
        })
        .collect()
}

pub fn idle(runtime: &Runtime, hero: &str, mission: &str, hours: f64) -> Result<IdleClaim> {
    if !hours.is_finite() || hours < 0.0 {
        bail!("--hours must be a non-negative number");
    }
    let now = Utc::now();
    let started_at = Duration::try_milliseconds((hours * 3_600_000.0) as i64)
        .and_then(|offline| now.checked_sub_signed(offline))
        .with_context(|| format!("--hours {hours} reaches before the earliest timestamp"))?;

    let idle = runtime.idle();
    let session = idle
        .start(hero, mission, started_at)
        .with_context(|| format!("start idle {hero} on {mission}"))?;
    Ok(idle.claim(&session.id, now)?)
}

pub fn level(experience: u64, from: u32) -> LevelReport {
    let level = level_from_xp(from, experience);
    LevelReport {
        level,
        experience,
        next_level_at: xp_for_level(level.saturating_add(1)),
    }
}

pub fn missions(catalog: &ContentCatalog) -> Vec<MissionSummary> {
    catalog
        .missions
        .values()
        .map(|mission| MissionSummary {
            id: mission.id.clone(),
            name: mission.name.clone(),
            difficulty: mission.difficulty,
            enemies: mission.enemy_count(),
            power: mission.power_rating(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_report_points_at_next_threshold() {
        let report = level(303, 1);
        assert_eq!(report.level, 2);
        assert_eq!(report.next_level_at, 579);
    }

    #[test]
    fn zero_repeat_is_rejected() {
        let runtime = Runtime::builder().build();
        assert!(fight(&runtime, "a", "b", Some(0), None, 0).is_err());
    }

    #[test]
    fn out_of_range_hours_are_rejected() {
        let runtime = Runtime::builder().build();
        let err = idle(&runtime, "nobody", "nothing", 1e12).expect_err("too far back");
        assert!(err.to_string().contains("--hours"));

        assert!(idle(&runtime, "nobody", "nothing", f64::NAN).is_err());
        assert!(idle(&runtime, "nobody", "nothing", -1.0).is_err());
    }
}
