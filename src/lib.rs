// ============================================================================
// STARFIELD - Daily-seeded night sky with twinkle and shooting stars
// ============================================================================
//
// The same calendar day always lays out the same stars. Shooting-star timing
// and flicker come from a per-session stream so no two visits look alike.
//
// Hosts supply a `Surface`, the viewport size, a tick and a visibility
// signal; `Starfield` does the rest.

pub mod config;
pub mod render;
pub mod rng;
pub mod sim;
pub mod world;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::StarfieldConfig;
pub use render::{FillStyle, Renderer, Surface};
pub use rng::{SeedDate, SeededRng, SessionRng};
pub use sim::{FrameOutcome, ShootingStar, Star, StarKind, Starfield};

#[cfg(target_arch = "wasm32")]
pub use web::{CanvasSurface, StarfieldApp};
