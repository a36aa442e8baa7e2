//! Floating hearts behind every screen.
//!
//! Each heart rises from the bottom edge to the top on its own period and
//! wraps around. Positions are fractions of the drawing area so the frontend
//! can scale them to any size.

use std::time::Duration;

/// Hearts in the background.
pub const HEART_COUNT: usize = 15;

const MIN_PERIOD_SECS: f32 = 6.0;
const MAX_PERIOD_SECS: f32 = 14.0;
/// Distinct heart glyphs the frontend can pick from.
pub const HEART_STYLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heart {
    /// Horizontal position in `[0, 1)`.
    pub column: f32,
    /// Starting point in the cycle, in `[0, 1)`.
    pub offset: f32,
    pub period: Duration,
    /// Index into the frontend's glyph set, `< HEART_STYLES`.
    pub style: usize,
}

impl Heart {
    /// Vertical position at `elapsed`: 1.0 is the bottom edge, 0.0 the top.
    #[must_use]
    pub fn height_at(&self, elapsed: Duration) -> f32 {
        let period = self.period.as_secs_f32();
        if period <= 0.0 {
            return 1.0 - self.offset;
        }
        let cycle = (elapsed.as_secs_f32() / period + self.offset).fract();
        1.0 - cycle
    }
}

#[derive(Debug, Clone)]
pub struct Hearts {
    hearts: Vec<Heart>,
}

impl Hearts {
    /// Random columns, offsets, periods and styles, drawn once.
    #[must_use]
    pub fn scatter(count: usize) -> Self {
        let hearts = (0..count)
            .map(|_| Heart {
                column: rand::random::<f32>(),
                offset: rand::random::<f32>(),
                period: Duration::from_secs_f32(
                    MIN_PERIOD_SECS + rand::random::<f32>() * (MAX_PERIOD_SECS - MIN_PERIOD_SECS),
                ),
                style: rand::random::<u32>() as usize % HEART_STYLES,
            })
            .collect();
        Self { hearts }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hearts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hearts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Heart> {
        self.hearts.iter()
    }

    /// `(column, height, style)` for every heart at `elapsed`.
    pub fn positions(&self, elapsed: Duration) -> impl Iterator<Item = (f32, f32, usize)> + '_ {
        self.hearts
            .iter()
            .map(move |heart| (heart.column, heart.height_at(elapsed), heart.style))
    }
}
