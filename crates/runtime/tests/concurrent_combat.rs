use std::path::Path;

use chrono::{Duration, TimeZone, Utc};
use game_content::ContentFactory;
use runtime::Runtime;

/// Parallel battles for one character must never lose a reward update.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_combats_keep_every_reward() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../game/content/data");
    let catalog = ContentFactory::new(data).load_catalog().expect("content");
    let runtime = Runtime::from_catalog(&catalog).expect("runtime");
    let start = Utc
        .with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp");

    let mut handles = Vec::new();
    for battle in 0..16 {
        let combat = runtime.combat();
        let at = start + Duration::seconds(battle);
        handles.push(tokio::task::spawn_blocking(move || {
            combat.run("aria", "wolf-den", at)
        }));
    }

    let mut experience = 0;
    let mut gold = 0;
    for handle in handles {
        let resolution = handle.await.expect("join").expect("combat");
        experience += resolution.encounter.summary.rewards.experience;
        gold += resolution.encounter.summary.rewards.gold;
    }

    let aria = runtime
        .characters()
        .character("aria")
        .expect("repository")
        .expect("seeded");
    assert_eq!(aria.experience, experience);
    assert_eq!(aria.gold, gold);
    assert_eq!(
        runtime
            .encounters()
            .for_character("aria")
            .expect("encounters")
            .len(),
        16
    );
}
