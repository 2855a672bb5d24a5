use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use game_content::{ContentCatalog, ContentFactory};
use game_core::{CharacterProfile, Loadout, RewardResult};
use runtime::{
    CharacterRepository, InMemoryCharacterRepo, InventoryStack, RepositoryError,
    RewardApplication, Runtime, RuntimeError,
};

fn catalog() -> ContentCatalog {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../game/content/data");
    ContentFactory::new(data)
        .load_catalog()
        .expect("shipped content loads")
}

fn runtime() -> Runtime {
    Runtime::from_catalog(&catalog()).expect("in-memory seeding")
}

/// Character store whose reward writes fail while `failing` is set.
#[derive(Default)]
struct FlakyCharacters {
    inner: InMemoryCharacterRepo,
    failing: AtomicBool,
}

impl CharacterRepository for FlakyCharacters {
    fn character(&self, id: &str) -> runtime::repository::Result<Option<CharacterProfile>> {
        self.inner.character(id)
    }

    fn loadout(&self, id: &str) -> runtime::repository::Result<Option<Loadout>> {
        self.inner.loadout(id)
    }

    fn insert(
        &self,
        character: CharacterProfile,
        loadout: Loadout,
    ) -> runtime::repository::Result<()> {
        self.inner.insert(character, loadout)
    }

    fn apply_rewards(
        &self,
        id: &str,
        rewards: &RewardResult,
    ) -> runtime::repository::Result<RewardApplication> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::LockPoisoned);
        }
        self.inner.apply_rewards(id, rewards)
    }

    fn inventory(&self, id: &str) -> runtime::repository::Result<Vec<InventoryStack>> {
        self.inner.inventory(id)
    }
}

fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn claim_is_idempotent() {
    let runtime = runtime();
    let idle = runtime.idle();

    let session = idle
        .start("aria", "wolf-den", morning())
        .expect("session starts");
    assert!(!session.claimed);

    let first = idle
        .claim(&session.id, morning() + Duration::hours(3))
        .expect("first claim");
    let applied = first.applied.expect("first claim applies rewards");
    let rewards = first.session.rewards.clone().expect("rewards stored");
    assert!(first.session.claimed);
    assert_eq!(first.session.hours_offline, 3.0);
    assert!(rewards.experience > 0);
    assert_eq!(applied.character.experience, rewards.experience);

    let second = idle
        .claim(&session.id, morning() + Duration::hours(9))
        .expect("second claim");
    assert!(second.applied.is_none());
    assert_eq!(second.session, first.session);

    let aria = runtime
        .characters()
        .character("aria")
        .expect("repository")
        .expect("seeded");
    assert_eq!(aria.experience, rewards.experience);
}

#[test]
fn offline_hours_cap_at_twelve() {
    let long = runtime().idle();
    let capped = runtime().idle();

    let a = long.start("corvin", "spider-nest", morning()).expect("start");
    let b = capped
        .start("corvin", "spider-nest", morning())
        .expect("start");

    let long_claim = long
        .claim(&a.id, morning() + Duration::hours(100))
        .expect("claim");
    let capped_claim = capped
        .claim(&b.id, morning() + Duration::hours(12))
        .expect("claim");

    assert_eq!(long_claim.session.rewards, capped_claim.session.rewards);
    assert_eq!(long_claim.session.hours_offline, 100.0);
}

#[test]
fn unknown_references_are_rejected() {
    let idle = runtime().idle();

    assert!(matches!(
        idle.start("nobody", "wolf-den", morning()),
        Err(RuntimeError::CharacterNotFound(_))
    ));
    assert!(matches!(
        idle.start("aria", "nowhere", morning()),
        Err(RuntimeError::MissionNotFound(_))
    ));
    assert!(matches!(
        idle.claim("idle-missing", morning()),
        Err(RuntimeError::SessionNotFound(_))
    ));
}

#[test]
fn restarting_the_same_window_is_a_duplicate() {
    let idle = runtime().idle();
    idle.start("aria", "wolf-den", morning()).expect("start");

    assert!(matches!(
        idle.start("aria", "wolf-den", morning()),
        Err(RuntimeError::Repository(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_claims_pay_out_once() {
    let runtime = runtime();
    let session = runtime
        .idle()
        .start("aria", "goblin-camp", morning())
        .expect("start");
    let session_id = Arc::new(session.id);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let idle = runtime.idle();
        let session_id = Arc::clone(&session_id);
        handles.push(tokio::task::spawn_blocking(move || {
            idle.claim(&session_id, morning() + Duration::hours(6))
        }));
    }

    let mut applied = 0;
    let mut stored = None;
    for handle in handles {
        let claim = handle.await.expect("join").expect("claim");
        if claim.applied.is_some() {
            applied += 1;
        }
        stored = claim.session.rewards;
    }
    assert_eq!(applied, 1);

    let aria = runtime
        .characters()
        .character("aria")
        .expect("repository")
        .expect("seeded");
    assert_eq!(aria.experience, stored.expect("rewards").experience);
}

#[test]
fn failed_reward_write_leaves_session_claimable() {
    let catalog = catalog();
    let characters = Arc::new(FlakyCharacters::default());
    let runtime = Runtime::builder()
        .characters(characters.clone())
        .build();
    for mission in catalog.missions.values() {
        runtime.missions().insert(mission.clone()).expect("seed mission");
    }
    let aria = catalog.hero("aria").expect("aria ships");
    characters
        .insert(aria.profile.clone(), aria.loadout.clone())
        .expect("seed hero");

    let idle = runtime.idle();
    let session = idle.start("aria", "wolf-den", morning()).expect("start");

    // ================================================================
    // PHASE 1: Reward write fails, the claim is rolled back
    // ================================================================
    characters.failing.store(true, Ordering::SeqCst);
    assert!(matches!(
        idle.claim(&session.id, morning() + Duration::hours(4)),
        Err(RuntimeError::Repository(RepositoryError::LockPoisoned))
    ));
    let stored = runtime
        .idle()
        .claim(&session.id, morning() + Duration::hours(4));
    assert!(stored.is_err(), "still failing while the store is down");

    // ================================================================
    // PHASE 2: Retry pays out exactly once
    // ================================================================
    characters.failing.store(false, Ordering::SeqCst);
    let retry = idle
        .claim(&session.id, morning() + Duration::hours(4))
        .expect("retry claim");
    let applied = retry.applied.expect("retry applies rewards");
    let rewards = retry.session.rewards.expect("rewards stored");
    assert!(rewards.experience > 0);
    assert_eq!(applied.character.experience, rewards.experience);

    let again = idle
        .claim(&session.id, morning() + Duration::hours(8))
        .expect("re-claim");
    assert!(again.applied.is_none());
}
