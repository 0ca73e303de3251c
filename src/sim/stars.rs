// stars.rs - Static background stars
//
// Generation is one-shot rejection sampling weighted by blended noise.
// Twinkle is the only per-frame mutation: brightness bounces inside
// [MIN_BRIGHTNESS, MAX_BRIGHTNESS].

use crate::rng::{SeededRng, SessionRng};
use crate::world::NoiseField;

// Noise blend
const STRUCTURE_SCALE: f64 = 0.0025;
const DETAIL_SCALE: f64 = 0.012;
const STRUCTURE_WEIGHT: f64 = 0.75;
const DETAIL_WEIGHT: f64 = 0.25;
const NOISE_JITTER: f64 = 0.1;
const CONTRAST: f64 = 4.24;
const CLUSTER_WEIGHT: f64 = 0.9;
const UNIFORM_WEIGHT: f64 = 0.2;

// Spacing (px)
pub(crate) const SPACING_BASE: f64 = 8.0;
pub(crate) const SPACING_VARIATION: f64 = 5.0;
const SPACING_JITTER: f64 = 1.5;
pub(crate) const POSITION_JITTER: f64 = 0.5;

// Classification
const ISOLATED_BRIGHT_CHANCE: f64 = 0.004;
const CORE_THRESHOLD: f64 = 0.72;
const CORE_PLUS_CHANCE: f64 = 0.12;
const DENSE_THRESHOLD: f64 = 0.55;
const DENSE_MEDIUM_CHANCE: f64 = 0.3;

// Twinkle
pub const MIN_BRIGHTNESS: f64 = 0.2;
pub const MAX_BRIGHTNESS: f64 = 0.9;
const BLINK_SPEED_MIN: f64 = 0.002;
const BLINK_SPEED_MAX: f64 = 0.012;
const FLICKER_CHANCE: f64 = 0.05;
const FLICKER_LOW: f64 = 0.4;
const FLICKER_HIGH: f64 = 0.7;

/// Visual footprint of a star, dispatched by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StarKind {
    Pixel1x1,
    Pixel2x2,
    Plus3x3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Blink {
    Rising,
    Falling,
}

impl Blink {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Blink::Rising => 1.0,
            Blink::Falling => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub kind: StarKind,
    pub brightness: f64,
    pub blink_speed: f64,
    pub blink: Blink,
}

/// Place stars over a `width` x `height` viewport.
///
/// Both the target count and the attempt budget equal `budget`. Every draw
/// comes from the seeded stream, so the same key and size reproduce the
/// same layout bit for bit.
pub fn generate(
    width: f64,
    height: f64,
    budget: usize,
    rng: &mut SeededRng,
    noise: &NoiseField,
) -> Vec<Star> {
    let mut stars: Vec<Star> = Vec::with_capacity(budget / 4);
    if width <= 0.0 || height <= 0.0 {
        return stars;
    }

    let mut attempts = 0;
    while attempts < budget && stars.len() < budget {
        attempts += 1;

        let x = rng.next_f64() * width;
        let y = rng.next_f64() * height;

        let structure = structure_at(noise, x, y);
        let detail = noise.sample_unit(x * DETAIL_SCALE, y * DETAIL_SCALE);
        let blended = STRUCTURE_WEIGHT * structure
            + DETAIL_WEIGHT * detail
            + (rng.next_f64() - 0.5) * NOISE_JITTER;

        let probability = blended.clamp(0.0, 1.0).powf(CONTRAST);
        let effective = probability * CLUSTER_WEIGHT + rng.next_f64() * UNIFORM_WEIGHT;
        if rng.next_f64() >= effective {
            continue;
        }

        let spacing = min_spacing(structure, rng);
        if crowded(&stars, x, y, spacing) {
            continue;
        }

        let x = x + (rng.next_f64() - 0.5) * 2.0 * POSITION_JITTER;
        let y = y + (rng.next_f64() - 0.5) * 2.0 * POSITION_JITTER;
        let (kind, brightness) = classify(structure, rng);

        stars.push(Star {
            x,
            y,
            kind,
            brightness,
            blink_speed: rng.range(BLINK_SPEED_MIN, BLINK_SPEED_MAX),
            blink: if rng.next_f64() < 0.5 { Blink::Rising } else { Blink::Falling },
        });
    }

    stars
}

/// Large-scale cluster structure in [0,1].
#[inline]
fn structure_at(noise: &NoiseField, x: f64, y: f64) -> f64 {
    noise.sample_unit(x * STRUCTURE_SCALE, y * STRUCTURE_SCALE)
}

/// Cluster cores allow tighter packing.
#[inline]
fn min_spacing(structure: f64, rng: &mut SeededRng) -> f64 {
    SPACING_BASE - structure * SPACING_VARIATION + rng.next_f64() * SPACING_JITTER
}

fn crowded(stars: &[Star], x: f64, y: f64, spacing: f64) -> bool {
    let min2 = spacing * spacing;
    stars.iter().any(|s| {
        let dx = s.x - x;
        let dy = s.y - y;
        dx * dx + dy * dy < min2
    })
}

fn classify(structure: f64, rng: &mut SeededRng) -> (StarKind, f64) {
    let isolated = rng.next_f64();
    let roll = rng.next_f64();

    if isolated < ISOLATED_BRIGHT_CHANCE {
        (StarKind::Plus3x3, rng.range(0.75, MAX_BRIGHTNESS))
    } else if structure > CORE_THRESHOLD && roll < CORE_PLUS_CHANCE {
        (StarKind::Plus3x3, rng.range(0.65, MAX_BRIGHTNESS))
    } else if structure > DENSE_THRESHOLD && roll < DENSE_MEDIUM_CHANCE {
        (StarKind::Pixel2x2, rng.range(0.45, 0.8))
    } else {
        (StarKind::Pixel1x1, rng.range(MIN_BRIGHTNESS, 0.6))
    }
}

/// Advance every star's brightness by one frame.
pub fn twinkle(stars: &mut [Star], rng: &mut SessionRng) {
    for star in stars.iter_mut() {
        star.brightness += star.blink.sign() * star.blink_speed;

        let bounced = if star.brightness > MAX_BRIGHTNESS {
            star.brightness = MAX_BRIGHTNESS;
            star.blink = Blink::Falling;
            true
        } else if star.brightness < MIN_BRIGHTNESS {
            star.brightness = MIN_BRIGHTNESS;
            star.blink = Blink::Rising;
            true
        } else {
            false
        };

        // Atmospheric flicker
        if bounced && rng.chance(FLICKER_CHANCE) {
            star.brightness = rng.range(FLICKER_LOW, FLICKER_HIGH);
            star.blink_speed = rng.range(BLINK_SPEED_MIN, BLINK_SPEED_MAX);
        }
    }
}
