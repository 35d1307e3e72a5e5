//! Deadline-bound scheduling for celebration effects.
//!
//! A celebration is a [`CelebrationPlan`] (tick interval, duration and the
//! bursts to emit per tick) driven by [`run_celebration`]. The runner checks a
//! [`CancelToken`] on every tick and never outlives its deadline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::time::{Instant, MissedTickBehavior};
use tracker_core::milestone::{CelebrationTier, NormalizedPoint};
use tracker_core::model::Mode;

const WHITE: &str = "#ffffff";
const GREEN: &str = "#22c55e";

/// Parameters for one spray of particles.
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    pub origin: NormalizedPoint,
    pub particle_count: u32,
    /// Launch direction in degrees; 90 is straight up.
    pub angle: f32,
    /// Angular spread in degrees around `angle`.
    pub spread: f32,
    pub start_velocity: f32,
    pub gravity: f32,
    /// Particle size multiplier.
    pub scalar: f32,
    pub colors: Vec<&'static str>,
}

impl Burst {
    fn new(origin: NormalizedPoint, particle_count: u32, colors: Vec<&'static str>) -> Self {
        Self {
            origin,
            particle_count,
            angle: 90.0,
            spread: 45.0,
            start_velocity: 45.0,
            gravity: 1.0,
            scalar: 1.0,
            colors,
        }
    }

    fn angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    fn spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pattern {
    Single(NormalizedPoint),
    SideCannons,
    Fireworks,
    ModeSwitch,
}

/// A celebration ready to be scheduled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelebrationPlan {
    mode: Mode,
    pattern: Pattern,
    tick: Duration,
    duration: Duration,
}

impl CelebrationPlan {
    pub const FRAME: Duration = Duration::from_millis(50);
    pub const FIREWORK_TICK: Duration = Duration::from_millis(250);

    #[must_use]
    pub fn for_tier(tier: CelebrationTier, mode: Mode) -> Self {
        let (pattern, tick) = match tier {
            CelebrationTier::Single { origin } => (Pattern::Single(origin), Self::FRAME),
            CelebrationTier::Section => (Pattern::SideCannons, Self::FRAME),
            CelebrationTier::Extreme => (Pattern::Fireworks, Self::FIREWORK_TICK),
        };
        Self {
            mode,
            pattern,
            tick,
            duration: tier.duration(),
        }
    }

    /// The small burst shown after switching modes.
    #[must_use]
    pub fn mode_switch(mode: Mode) -> Self {
        Self {
            mode,
            pattern: Pattern::ModeSwitch,
            tick: Self::FRAME,
            duration: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Bursts for one tick with `remaining` time left before the deadline.
    pub fn bursts<R: Rng>(&self, remaining: Duration, rng: &mut R) -> Vec<Burst> {
        let accent = self.mode.accent_color();
        match self.pattern {
            Pattern::Single(origin) => {
                let mut burst = Burst::new(origin, 40, vec![accent, WHITE]).spread(60.0);
                burst.gravity = 1.2;
                burst.scalar = 0.7;
                vec![burst]
            }
            Pattern::ModeSwitch => {
                vec![Burst::new(NormalizedPoint::new(0.5, 0.1), 60, vec![accent]).spread(70.0)]
            }
            Pattern::SideCannons => vec![
                Burst::new(NormalizedPoint::new(0.0, 0.8), 5, vec![accent, GREEN])
                    .angle(60.0)
                    .spread(55.0),
                Burst::new(NormalizedPoint::new(1.0, 0.8), 5, vec![accent, GREEN])
                    .angle(120.0)
                    .spread(55.0),
            ],
            Pattern::Fireworks => {
                let fraction = if self.duration.is_zero() {
                    0.0
                } else {
                    remaining.as_secs_f32() / self.duration.as_secs_f32()
                };
                let count = (50.0 * fraction.clamp(0.0, 1.0)).round() as u32;
                let mut firework = |x_range: std::ops::Range<f32>| {
                    let origin = NormalizedPoint::new(
                        rng.random_range(x_range),
                        rng.random::<f32>() - 0.2,
                    );
                    let mut burst = Burst::new(origin, count, Vec::new()).spread(360.0);
                    burst.start_velocity = 30.0;
                    burst
                };
                let left = firework(0.1..0.3);
                let right = firework(0.7..0.9);
                vec![
                    left,
                    right,
                    Burst::new(NormalizedPoint::new(0.0, 0.5), 10, vec![Mode::Lld.accent_color(), WHITE])
                        .angle(60.0)
                        .spread(80.0),
                    Burst::new(NormalizedPoint::new(1.0, 0.5), 10, vec![Mode::Hld.accent_color(), WHITE])
                        .angle(120.0)
                        .spread(80.0),
                ]
            }
        }
    }
}

/// Shared stop flag checked by the runner on every tick.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationEnd {
    Finished,
    Cancelled,
}

/// Drive `plan` until its deadline or until `token` is cancelled.
///
/// The first tick always emits; later ticks emit only while the deadline has
/// not passed.
pub async fn run_celebration<F>(plan: CelebrationPlan, token: CancelToken, emit: F) -> CelebrationEnd
where
    F: FnMut(Burst),
{
    let mut rng = rand::rng();
    run_celebration_with_rng(plan, token, &mut rng, emit).await
}

/// [`run_celebration`] with a caller-supplied random source.
pub async fn run_celebration_with_rng<R, F>(
    plan: CelebrationPlan,
    token: CancelToken,
    rng: &mut R,
    mut emit: F,
) -> CelebrationEnd
where
    R: Rng,
    F: FnMut(Burst),
{
    let deadline = Instant::now() + plan.duration;
    let mut ticker = tokio::time::interval(plan.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut first = true;

    loop {
        ticker.tick().await;
        if token.is_cancelled() {
            return CelebrationEnd::Cancelled;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !first && remaining.is_zero() {
            return CelebrationEnd::Finished;
        }
        first = false;
        for burst in plan.bursts(remaining, rng) {
            emit(burst);
        }
        if remaining.is_zero() {
            return CelebrationEnd::Finished;
        }
    }
}
