use rand::Rng;
use services::Burst;

/// Colours used when a burst does not name its own.
const DEFAULT_PALETTE: &[&str] = &["#26ccff", "#a25afd", "#ff5e7e", "#88ff5a", "#fcff42", "#ffa62d"];

/// Upper bound on particles kept on screen at once.
pub const MAX_PARTICLES: usize = 600;

/// Pixels travelled per unit of launch velocity.
const VELOCITY_SCALE: f32 = 9.0;

/// One absolutely positioned particle animated by CSS.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleVm {
    pub key: u64,
    pub left_pct: f32,
    pub top_pct: f32,
    pub dx: f32,
    pub dy: f32,
    pub rotation: f32,
    pub size: f32,
    pub color: &'static str,
    pub duration_ms: u32,
}

impl ParticleVm {
    #[must_use]
    pub fn style(&self) -> String {
        format!(
            "left:{:.2}%;top:{:.2}%;width:{:.1}px;height:{:.1}px;background:{};\
             --dx:{:.0}px;--dy:{:.0}px;--rot:{:.0}deg;animation-duration:{}ms;",
            self.left_pct,
            self.top_pct,
            self.size,
            self.size * 0.6,
            self.color,
            self.dx,
            self.dy,
            self.rotation,
            self.duration_ms,
        )
    }
}

/// Expand `burst` into particles, numbering them from `next_key`.
pub fn particles_from_burst<R: Rng>(burst: &Burst, next_key: &mut u64, rng: &mut R) -> Vec<ParticleVm> {
    let palette: &[&'static str] = if burst.colors.is_empty() {
        DEFAULT_PALETTE
    } else {
        &burst.colors
    };

    (0..burst.particle_count)
        .map(|i| {
            let jitter = rng.random_range(-0.5f32..=0.5) * burst.spread;
            let angle = (burst.angle + jitter).to_radians();
            let velocity = burst.start_velocity * rng.random_range(0.5f32..=1.0) * VELOCITY_SCALE;
            let fall = 120.0 * burst.gravity;
            let key = *next_key;
            *next_key += 1;
            ParticleVm {
                key,
                left_pct: burst.origin.x * 100.0,
                top_pct: burst.origin.y * 100.0,
                dx: angle.cos() * velocity,
                dy: -angle.sin() * velocity + fall,
                rotation: rng.random_range(0.0f32..720.0),
                size: 10.0 * burst.scalar,
                color: palette[i as usize % palette.len()],
                duration_ms: rng.random_range(1400..2200),
            }
        })
        .collect()
}

/// Append `incoming`, dropping the oldest particles beyond [`MAX_PARTICLES`].
pub fn push_particles(particles: &mut Vec<ParticleVm>, incoming: Vec<ParticleVm>) {
    particles.extend(incoming);
    if particles.len() > MAX_PARTICLES {
        let excess = particles.len() - MAX_PARTICLES;
        particles.drain(..excess);
    }
}
