use std::time::Duration;

use crate::progress::CompletionStats;

/// A point relative to the viewport, each axis in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    /// Normalise client coordinates against the viewport size.
    #[must_use]
    pub fn from_client(x: f64, y: f64, width: f64, height: f64) -> Self {
        let axis = |value: f64, extent: f64| {
            if extent > 0.0 && value.is_finite() {
                (value / extent) as f32
            } else {
                0.5
            }
        };
        Self::new(axis(x, width), axis(y, height))
    }
}

impl Default for NormalizedPoint {
    fn default() -> Self {
        Self::CENTER
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.5
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Escalating cosmetic feedback after a topic is completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CelebrationTier {
    /// Small burst where the user clicked.
    Single { origin: NormalizedPoint },
    /// The active section is now fully complete.
    Section,
    /// Every topic in the mode is complete.
    Extreme,
}

impl CelebrationTier {
    pub const SECTION_DURATION: Duration = Duration::from_secs(1);
    pub const EXTREME_DURATION: Duration = Duration::from_secs(8);

    /// Pick exactly one tier. Global completion outranks section completion.
    #[must_use]
    pub fn select(global_percent: u8, section: CompletionStats, origin: NormalizedPoint) -> Self {
        if global_percent >= 100 {
            CelebrationTier::Extreme
        } else if section.is_complete() {
            CelebrationTier::Section
        } else {
            CelebrationTier::Single { origin }
        }
    }

    /// How long the effect keeps emitting.
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            CelebrationTier::Single { .. } => Duration::ZERO,
            CelebrationTier::Section => Self::SECTION_DURATION,
            CelebrationTier::Extreme => Self::EXTREME_DURATION,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CelebrationTier::Single { .. } => "single",
            CelebrationTier::Section => "section",
            CelebrationTier::Extreme => "extreme",
        }
    }
}
