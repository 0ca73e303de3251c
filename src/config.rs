// config.rs - Runtime tunables
//
// Algorithm constants live next to the code that uses them; this struct
// holds the knobs a host may want to turn.

use std::ops::Range;

#[derive(Clone, Debug, PartialEq)]
pub struct StarfieldConfig {
    /// Viewport area per star sample; drives both target count and attempt budget.
    pub pixels_per_star: f64,
    /// Shooting-star spawn cadence in milliseconds, sampled uniformly.
    pub spawn_interval_ms: Range<f64>,
    /// Capacity limit for live shooting stars.
    pub max_shooting_stars: usize,
    pub twinkle_enabled: bool,
    pub shooting_stars_enabled: bool,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            pixels_per_star: 100.0,
            spawn_interval_ms: 9000.0..15000.0,
            max_shooting_stars: 8,
            twinkle_enabled: true,
            shooting_stars_enabled: true,
        }
    }
}

impl StarfieldConfig {
    /// Sample budget for a viewport: `floor(width * height / pixels_per_star)`.
    pub fn sample_budget(&self, width: f64, height: f64) -> usize {
        if width <= 0.0 || height <= 0.0 || self.pixels_per_star <= 0.0 {
            return 0;
        }
        (width * height / self.pixels_per_star).floor() as usize
    }
}
