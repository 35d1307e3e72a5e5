use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{CancelToken, CelebrationEnd, CelebrationPlan, run_celebration_with_rng};
use tracker_core::milestone::{CelebrationTier, NormalizedPoint};
use tracker_core::model::Mode;

#[tokio::test(start_paused = true)]
async fn single_tier_emits_once() {
    let plan = CelebrationPlan::for_tier(
        CelebrationTier::Single {
            origin: NormalizedPoint::CENTER,
        },
        Mode::Lld,
    );
    let mut bursts = Vec::new();
    let end = run_celebration_with_rng(
        plan,
        CancelToken::new(),
        &mut StdRng::seed_from_u64(1),
        |b| bursts.push(b),
    )
    .await;
    assert_eq!(end, CelebrationEnd::Finished);
    assert_eq!(bursts.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn section_tier_stops_at_its_deadline() {
    let plan = CelebrationPlan::for_tier(CelebrationTier::Section, Mode::Lld);
    let start = tokio::time::Instant::now();
    let mut ticks = 0;
    let end = run_celebration_with_rng(
        plan,
        CancelToken::new(),
        &mut StdRng::seed_from_u64(2),
        |_| ticks += 1,
    )
    .await;
    assert_eq!(end, CelebrationEnd::Finished);
    // Two cannons per frame, one frame every 50ms for one second.
    assert_eq!(ticks, 2 * 20);
    assert_eq!(start.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn extreme_tier_runs_eight_seconds_and_fades() {
    let plan = CelebrationPlan::for_tier(CelebrationTier::Extreme, Mode::Hld);
    let mut counts = Vec::new();
    let end = run_celebration_with_rng(
        plan,
        CancelToken::new(),
        &mut StdRng::seed_from_u64(3),
        |b| counts.push(b.particle_count),
    )
    .await;
    assert_eq!(end, CelebrationEnd::Finished);
    assert_eq!(counts.len(), 4 * 32);
    assert_eq!(counts[0], 50);
    let last_firework = counts[counts.len() - 4];
    assert!(last_firework <= 2, "fireworks should fade, got {last_firework}");
}

#[tokio::test(start_paused = true)]
async fn cancelled_celebration_stops_emitting() {
    let plan = CelebrationPlan::for_tier(CelebrationTier::Extreme, Mode::Lld);
    let token = CancelToken::new();
    let canceller = token.clone();
    let mut emitted = 0;
    let end = run_celebration_with_rng(plan, token, &mut StdRng::seed_from_u64(4), |_| {
        emitted += 1;
        if emitted == 8 {
            canceller.cancel();
        }
    })
    .await;
    assert_eq!(end, CelebrationEnd::Cancelled);
    assert_eq!(emitted, 8);
}
