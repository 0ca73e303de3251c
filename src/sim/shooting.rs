// shooting.rs - Shooting stars
//
// Lifecycle per star, over progress = distance_traveled / max_travel:
//   intro  (< 0.15)       alpha ramps 0 -> max_alpha
//   cruise (0.15 ..= 0.7) alpha = max_alpha
//   outro  (> 0.7)        alpha ramps max_alpha -> 0
//
// The tail leaves shimmer pixels behind. A star stays in the active set
// until it has finished flying AND its shimmer has faded out.

use std::f64::consts::FRAC_PI_4;
use std::ops::Range;

use crate::rng::{SeededRng, SessionRng};

// Spawn kinematics
const HEADING: f64 = FRAC_PI_4; // 45 degrees, down and to the right
const SPEED_MIN: f64 = 5.0;
const SPEED_MAX: f64 = 13.0;
const TAIL_MIN: f64 = 30.0;
const TAIL_MAX: f64 = 60.0;
const ALPHA_MIN: f64 = 0.8;
const ALPHA_MAX: f64 = 1.0;
const SPAWN_BAND: f64 = 0.3;
const SPAWN_SPAN_X: f64 = 0.8;
const MAX_TRAVEL_FRACTION: f64 = 0.5;

// Phases
const INTRO_END: f64 = 0.15;
const OUTRO_START: f64 = 0.7;

// Shimmer
pub const MAX_SHIMMER: usize = 256;
pub const SHIMMER_FLOOR: f64 = 0.03;
const SHIMMER_DEEP_TAIL: f64 = 0.6;
const SHIMMER_CHANCE_NEAR: f64 = 0.008;
const SHIMMER_CHANCE_DEEP: f64 = 0.05;
const SHIMMER_STRENGTH: f64 = 0.7;
const SHIMMER_SLOW_CHANCE: f64 = 0.35;
const DECAY_FAST: f64 = 0.88;
const DECAY_SLOW: f64 = 0.96;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShimmerPixel {
    pub x: f64,
    pub y: f64,
    pub alpha: f64,
    pub decay: f64,
}

/// One tail sample behind the head. `alpha` excludes horizon fade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TailPixel {
    pub x: f64,
    pub y: f64,
    pub alpha: f64,
    /// Position along the tail, 0 at the head and 1 at the end.
    pub depth: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShootingStar {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub max_alpha: f64,
    pub tail_length: f64,
    pub distance_traveled: f64,
    pub max_travel: f64,
    pub shimmer: Vec<ShimmerPixel>,
}

impl ShootingStar {
    pub fn new(
        x: f64,
        y: f64,
        heading: f64,
        speed: f64,
        tail_length: f64,
        max_alpha: f64,
        max_travel: f64,
    ) -> Self {
        Self {
            x,
            y,
            vx: heading.cos() * speed,
            vy: heading.sin() * speed,
            max_alpha,
            tail_length,
            distance_traveled: 0.0,
            max_travel,
            shimmer: Vec::new(),
        }
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    pub fn progress(&self) -> f64 {
        if self.max_travel <= 0.0 {
            return 1.0;
        }
        (self.distance_traveled / self.max_travel).clamp(0.0, 1.0)
    }

    /// Head alpha for the current phase.
    pub fn alpha(&self) -> f64 {
        let p = self.progress();
        if p < INTRO_END {
            self.max_alpha * (p / INTRO_END)
        } else if p <= OUTRO_START {
            self.max_alpha
        } else {
            (self.max_alpha * (1.0 - (p - OUTRO_START) / (1.0 - OUTRO_START))).max(0.0)
        }
    }

    /// Unit heading, or `None` for a zero-length velocity.
    pub fn heading(&self) -> Option<(f64, f64)> {
        let len = self.speed();
        if len <= f64::EPSILON || !len.is_finite() {
            return None;
        }
        Some((self.vx / len, self.vy / len))
    }

    /// Still flying: moving, travel budget left and head inside the viewport.
    pub fn in_flight(&self, width: f64, height: f64) -> bool {
        self.heading().is_some()
            && self.distance_traveled < self.max_travel
            && self.x >= 0.0
            && self.x <= width
            && self.y >= 0.0
            && self.y <= height
    }

    pub fn is_live(&self, width: f64, height: f64) -> bool {
        self.in_flight(width, height) || !self.shimmer.is_empty()
    }

    /// One pixel per unit of tail length behind the head.
    pub fn tail(&self) -> impl Iterator<Item = TailPixel> + '_ {
        let heading = self.heading();
        let len = if heading.is_some() { self.tail_length.max(0.0) as usize } else { 0 };
        let (hx, hy) = heading.unwrap_or((0.0, 0.0));
        let head_alpha = self.alpha();

        (1..=len).map(move |i| {
            let depth = i as f64 / self.tail_length;
            TailPixel {
                x: self.x - hx * i as f64,
                y: self.y - hy * i as f64,
                alpha: head_alpha * (1.0 - depth),
                depth,
            }
        })
    }

    fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.distance_traveled += self.speed();
    }

    fn age_shimmer(&mut self) {
        for p in self.shimmer.iter_mut() {
            p.alpha *= p.decay;
        }
        self.shimmer.retain(|p| p.alpha >= SHIMMER_FLOOR);
    }

    fn seed_shimmer(&mut self, rng: &mut SessionRng) {
        let mut fresh = Vec::new();
        for px in self.tail() {
            if self.shimmer.len() + fresh.len() >= MAX_SHIMMER {
                break;
            }
            let chance = if px.depth > SHIMMER_DEEP_TAIL {
                SHIMMER_CHANCE_DEEP
            } else {
                SHIMMER_CHANCE_NEAR
            };
            if !rng.chance(chance) {
                continue;
            }
            let alpha = px.alpha * SHIMMER_STRENGTH;
            if alpha < SHIMMER_FLOOR {
                continue;
            }
            let decay = if rng.chance(SHIMMER_SLOW_CHANCE) { DECAY_SLOW } else { DECAY_FAST };
            fresh.push(ShimmerPixel { x: px.x, y: px.y, alpha, decay });
        }
        self.shimmer.extend(fresh);
    }
}

/// Active shooting stars.
#[derive(Clone, Debug, Default)]
pub struct ShootingStars {
    live: Vec<ShootingStar>,
}

impl ShootingStars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn as_slice(&self) -> &[ShootingStar] {
        &self.live
    }

    pub fn push(&mut self, star: ShootingStar) {
        self.live.push(star);
    }

    /// Launch a star from the top band of the viewport, away from the
    /// right edge it is heading for.
    ///
    /// Kinematics come from the seeded stream; returns `false` when the
    /// viewport is degenerate or `capacity` is reached.
    pub fn spawn(&mut self, width: f64, height: f64, capacity: usize, rng: &mut SeededRng) -> bool {
        if width <= 0.0 || height <= 0.0 || self.live.len() >= capacity {
            return false;
        }

        let x = rng.next_f64() * width * SPAWN_SPAN_X;
        let y = rng.next_f64() * height * SPAWN_BAND;
        let speed = rng.range(SPEED_MIN, SPEED_MAX);
        let tail_length = rng.range(TAIL_MIN, TAIL_MAX);
        let max_alpha = rng.range(ALPHA_MIN, ALPHA_MAX);
        let max_travel = width.hypot(height) * MAX_TRAVEL_FRACTION;

        log::trace!("shooting star at ({x:.1}, {y:.1}) speed {speed:.2}");
        self.live.push(ShootingStar::new(x, y, HEADING, speed, tail_length, max_alpha, max_travel));
        true
    }

    /// Move, age shimmer, drop finished stars.
    pub fn update(&mut self, width: f64, height: f64, rng: &mut SessionRng) {
        for star in self.live.iter_mut() {
            star.age_shimmer();
            if star.in_flight(width, height) {
                star.advance();
                if star.in_flight(width, height) {
                    star.seed_shimmer(rng);
                }
            }
        }

        let before = self.live.len();
        self.live.retain(|s| s.is_live(width, height));
        if self.live.len() < before {
            log::trace!("evicted {} shooting star(s)", before - self.live.len());
        }
    }
}

/// Randomized interval trigger. Only decides *when*; never touches stars.
#[derive(Clone, Debug)]
pub struct SpawnTimer {
    interval: Range<f64>,
    next_at: Option<f64>,
}

impl SpawnTimer {
    pub fn new(interval: Range<f64>) -> Self {
        Self { interval, next_at: None }
    }

    /// Returns `true` once per elapsed interval. The first call arms the timer.
    pub fn poll(&mut self, now_ms: f64, rng: &mut SessionRng) -> bool {
        match self.next_at {
            Some(at) if now_ms >= at => {
                self.next_at = Some(now_ms + self.sample(rng));
                true
            }
            Some(_) => false,
            None => {
                self.next_at = Some(now_ms + self.sample(rng));
                false
            }
        }
    }

    fn sample(&self, rng: &mut SessionRng) -> f64 {
        if self.interval.end <= self.interval.start {
            return self.interval.start.max(0.0);
        }
        rng.range(self.interval.start, self.interval.end)
    }
}
