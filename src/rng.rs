// rng.rs - Random sources
//
// Two streams, deliberately kept apart:
//   SeededRng  - reproducible, keyed by the calendar day. Owns star layout
//                and shooting-star kinematics.
//   SessionRng - fresh every load. Owns spawn timing, flicker and shimmer.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const KEY_PREFIX: &str = "starfield";

// FNV-1a 64-bit
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Calendar day used to build the daily seed key.
///
/// `month0` is zero-based (January = 0), matching the key format
/// `starfield-<year>-<month0>-<day>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeedDate {
    pub year: i32,
    pub month0: u32,
    pub day: u32,
}

impl SeedDate {
    pub fn new(year: i32, month0: u32, day: u32) -> Self {
        Self { year, month0, day }
    }

    /// Stable key for this day.
    pub fn key(&self) -> String {
        format!("{}-{}-{}-{}", KEY_PREFIX, self.year, self.month0, self.day)
    }
}

/// Deterministic stream of `f64` in [0, 1), keyed by a string.
#[derive(Clone, Debug)]
pub struct SeededRng {
    key: String,
    inner: ChaCha8Rng,
}

impl SeededRng {
    pub fn from_key(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            inner: ChaCha8Rng::seed_from_u64(hash_key(key)),
        }
    }

    pub fn from_date(date: SeedDate) -> Self {
        Self::from_key(&date.key())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Uniform value in [lo, hi).
    #[inline]
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Non-reproducible stream for session-to-session variety.
#[derive(Clone, Debug)]
pub struct SessionRng {
    inner: SmallRng,
}

impl SessionRng {
    /// Fixed-seed stream, for tests and replay.
    pub fn with_seed(seed: u64) -> Self {
        Self { inner: SmallRng::seed_from_u64(seed) }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_entropy() -> Self {
        Self { inner: SmallRng::from_os_rng() }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_entropy() -> Self {
        // Math.random has 52 usable bits; mix in the clock for the rest.
        let bits = (js_sys::Math::random() * (1u64 << 52) as f64) as u64;
        let now = js_sys::Date::now() as u64;
        Self::with_seed(bits ^ now.rotate_left(52))
    }

    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    #[inline]
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn hash_key(key: &str) -> u64 {
    key.bytes()
        .fold(FNV_OFFSET, |h, b| (h ^ b as u64).wrapping_mul(FNV_PRIME))
}
