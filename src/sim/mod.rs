// sim/ - Starfield simulation
//
// Owns every collection and both random sources. One tick is:
//   spawn timer poll (enqueue only)
//   twinkle
//   shooting-star update
//   render
// Hidden ticks skip everything but the timer.

mod shooting;
mod stars;

pub use shooting::{ShimmerPixel, ShootingStar, ShootingStars, SpawnTimer, TailPixel};
pub use stars::{Blink, MAX_BRIGHTNESS, MIN_BRIGHTNESS, Star, StarKind, generate, twinkle};

use crate::config::StarfieldConfig;
use crate::render::{Renderer, Surface};
use crate::rng::{SeedDate, SeededRng, SessionRng};
use crate::world::NoiseField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    Skipped,
}

/// Starfield engine
pub struct Starfield {
    // Logical viewport
    w: f64,
    h: f64,

    config: StarfieldConfig,

    // Random sources; the seeded one is never reset
    seeded: SeededRng,
    session: SessionRng,
    noise: NoiseField,

    // Entities
    stars: Vec<Star>,
    shooting: ShootingStars,
    timer: SpawnTimer,

    renderer: Renderer,
    visible: bool,
}

impl Starfield {
    /// Engine for today's seed with a fresh session stream.
    pub fn new(width: f64, height: f64, date: SeedDate, config: StarfieldConfig) -> Self {
        Self::with_sources(
            width,
            height,
            SeededRng::from_date(date),
            SessionRng::from_entropy(),
            config,
        )
    }

    pub fn with_defaults(width: f64, height: f64, date: SeedDate) -> Self {
        Self::new(width, height, date, StarfieldConfig::default())
    }

    /// Engine with explicit random sources.
    pub fn with_sources(
        width: f64,
        height: f64,
        mut seeded: SeededRng,
        session: SessionRng,
        config: StarfieldConfig,
    ) -> Self {
        let noise = NoiseField::new(&mut seeded);
        let timer = SpawnTimer::new(config.spawn_interval_ms.clone());

        let mut field = Self {
            w: 0.0,
            h: 0.0,
            config,
            seeded,
            session,
            noise,
            stars: Vec::new(),
            shooting: ShootingStars::new(),
            timer,
            renderer: Renderer::new(),
            visible: true,
        };
        field.regenerate(width, height);

        log::info!(
            "starfield {} at {}x{}: {} stars",
            field.seeded.key(),
            field.w,
            field.h,
            field.stars.len()
        );
        field
    }

    /// Regenerate all static stars for a new viewport.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.regenerate(width, height);
        log::debug!("resized to {}x{}: {} stars", self.w, self.h, self.stars.len());
    }

    fn regenerate(&mut self, width: f64, height: f64) {
        let (w, h) = sanitize(width, height);
        let budget = self.config.sample_budget(w, h);
        // Built off to the side and swapped in whole.
        let stars = generate(w, h, budget, &mut self.seeded, &self.noise);

        self.w = w;
        self.h = h;
        self.stars = stars;
    }

    /// One frame. `now_ms` is the host's monotonic clock.
    pub fn tick<S: Surface>(&mut self, now_ms: f64, surface: &mut S) -> FrameOutcome {
        // At most one star queues up while hidden.
        if self.timer.poll(now_ms, &mut self.session)
            && self.config.shooting_stars_enabled
            && (self.visible || self.shooting.is_empty())
        {
            self.spawn_shooting_star();
        }

        if !self.visible {
            return FrameOutcome::Skipped;
        }

        self.update();
        self.render(surface);
        FrameOutcome::Rendered
    }

    /// Simulation half of a tick.
    pub fn update(&mut self) {
        if self.config.twinkle_enabled {
            twinkle(&mut self.stars, &mut self.session);
        }
        self.shooting.update(self.w, self.h, &mut self.session);
    }

    /// Render half of a tick. Reads state only.
    pub fn render<S: Surface>(&mut self, surface: &mut S) {
        self.renderer.draw(surface, &self.stars, self.shooting.as_slice(), self.w, self.h);
    }

    /// Report visibility. Coming back into view renders once immediately.
    pub fn set_visible<S: Surface>(&mut self, visible: bool, surface: &mut S) -> FrameOutcome {
        let was_visible = self.visible;
        self.visible = visible;

        if visible == was_visible {
            return FrameOutcome::Skipped;
        }

        log::debug!("visibility -> {visible}");
        if visible {
            self.render(surface);
            FrameOutcome::Rendered
        } else {
            FrameOutcome::Skipped
        }
    }

    /// Enqueue a shooting star now. Returns `false` at capacity.
    pub fn spawn_shooting_star(&mut self) -> bool {
        self.shooting
            .spawn(self.w, self.h, self.config.max_shooting_stars, &mut self.seeded)
    }

    // Accessors
    pub fn stars(&self) -> &[Star] { &self.stars }
    pub fn shooting_stars(&self) -> &[ShootingStar] { self.shooting.as_slice() }
    pub fn is_visible(&self) -> bool { self.visible }
    pub fn size(&self) -> (f64, f64) { (self.w, self.h) }
    pub fn seed_key(&self) -> &str { self.seeded.key() }
    pub fn config(&self) -> &StarfieldConfig { &self.config }
}

/// Negative or non-finite sizes collapse to an empty viewport.
fn sanitize(width: f64, height: f64) -> (f64, f64) {
    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    (clean(width), clean(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSurface;

    const SEED: &str = "starfield-2024-0-1";

    fn field(w: f64, h: f64) -> Starfield {
        Starfield::with_sources(
            w,
            h,
            SeededRng::from_key(SEED),
            SessionRng::with_seed(1),
            StarfieldConfig::default(),
        )
    }

    #[test]
    fn same_seed_reproduces_layout() {
        let a = field(800.0, 600.0);
        let b = field(800.0, 600.0);
        assert_eq!(a.stars().len(), 681);
        assert_eq!(a.stars(), b.stars());
        assert_eq!(a.seed_key(), SEED);
    }

    #[test]
    fn seed_date_matches_key() {
        let a = Starfield::with_defaults(320.0, 240.0, SeedDate::new(2024, 0, 1));
        let b = field(320.0, 240.0);
        assert_eq!(a.stars(), b.stars());
    }

    #[test]
    fn resize_to_zero_draws_nothing() {
        let mut f = field(800.0, 600.0);
        f.resize(0.0, 0.0);
        assert!(f.stars().is_empty());
        assert_eq!(f.size(), (0.0, 0.0));

        let mut surface = RecordingSurface::default();
        assert_eq!(f.tick(16.0, &mut surface), FrameOutcome::Rendered);
        assert_eq!(surface.clears, 1);
        assert!(surface.rects.is_empty());
        assert!(!f.spawn_shooting_star());
    }

    #[test]
    fn resize_replaces_stars() {
        let mut f = field(800.0, 600.0);
        f.resize(200.0, 100.0);
        assert!(f.stars().iter().all(|s| s.x <= 201.0 && s.y <= 101.0));
    }

    #[test]
    fn nonsense_sizes_are_empty() {
        let f = field(f64::NAN, -5.0);
        assert!(f.stars().is_empty());
        assert_eq!(f.size(), (0.0, 0.0));
    }

    #[test]
    fn hidden_ticks_skip_update_and_render() {
        let mut f = field(400.0, 300.0);
        let mut surface = RecordingSurface::default();
        f.set_visible(false, &mut surface);

        let before: Vec<f64> = f.stars().iter().map(|s| s.brightness).collect();
        for i in 0..10 {
            assert_eq!(f.tick(i as f64 * 16.0, &mut surface), FrameOutcome::Skipped);
        }
        let after: Vec<f64> = f.stars().iter().map(|s| s.brightness).collect();

        assert_eq!(before, after);
        assert_eq!(surface.clears, 0);
    }

    #[test]
    fn becoming_visible_forces_render() {
        let mut f = field(400.0, 300.0);
        let mut surface = RecordingSurface::default();

        assert_eq!(f.set_visible(false, &mut surface), FrameOutcome::Skipped);
        let before: Vec<f64> = f.stars().iter().map(|s| s.brightness).collect();

        assert_eq!(f.set_visible(true, &mut surface), FrameOutcome::Rendered);
        assert_eq!(surface.clears, 1);
        assert!(!surface.rects.is_empty());

        // forced render uses current state, no update
        let after: Vec<f64> = f.stars().iter().map(|s| s.brightness).collect();
        assert_eq!(before, after);

        // repeated report is not a transition
        assert_eq!(f.set_visible(true, &mut surface), FrameOutcome::Skipped);
        assert_eq!(surface.clears, 1);
    }

    #[test]
    fn timer_spawns_shooting_stars() {
        let mut f = field(800.0, 600.0);
        let mut surface = RecordingSurface::default();

        let mut t = 0.0;
        while t < 16_000.0 && f.shooting_stars().is_empty() {
            f.tick(t, &mut surface);
            t += 16.0;
        }
        assert!(!f.shooting_stars().is_empty());
        assert!(t >= 9_000.0);
    }

    #[test]
    fn timer_enqueues_while_hidden() {
        let mut f = field(800.0, 600.0);
        let mut surface = RecordingSurface::default();
        f.set_visible(false, &mut surface);

        f.tick(0.0, &mut surface);
        f.tick(15_000.0, &mut surface);
        assert_eq!(f.shooting_stars().len(), 1);
        // hidden: the new star has not moved
        assert_eq!(f.shooting_stars()[0].distance_traveled, 0.0);
    }

    #[test]
    fn long_hidden_stretch_queues_one_star() {
        let mut f = field(800.0, 600.0);
        let mut surface = RecordingSurface::default();
        f.set_visible(false, &mut surface);

        // two minutes of hidden frames, several timer intervals
        let mut t = 0.0;
        while t < 120_000.0 {
            f.tick(t, &mut surface);
            t += 16.0;
        }
        assert_eq!(f.shooting_stars().len(), 1);
        assert_eq!(f.shooting_stars()[0].distance_traveled, 0.0);
    }

    #[test]
    fn disabled_shooting_stars_never_spawn() {
        let config = StarfieldConfig { shooting_stars_enabled: false, ..Default::default() };
        let mut f = Starfield::with_sources(
            800.0,
            600.0,
            SeededRng::from_key(SEED),
            SessionRng::with_seed(1),
            config,
        );
        let mut surface = RecordingSurface::default();
        f.tick(0.0, &mut surface);
        f.tick(20_000.0, &mut surface);
        assert!(f.shooting_stars().is_empty());
    }

    #[test]
    fn spawn_respects_capacity() {
        let mut f = field(800.0, 600.0);
        let cap = f.config().max_shooting_stars;
        for _ in 0..cap {
            assert!(f.spawn_shooting_star());
        }
        assert!(!f.spawn_shooting_star());
        assert_eq!(f.shooting_stars().len(), cap);
    }

    #[test]
    fn brightness_stays_in_band_across_ticks() {
        let mut f = field(320.0, 240.0);
        let mut surface = RecordingSurface::default();
        for i in 0..2_000 {
            f.tick(i as f64 * 16.0, &mut surface);
        }
        assert!(f
            .stars()
            .iter()
            .all(|s| (MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&s.brightness)));
    }

    #[test]
    fn shooting_star_head_drawn_last() {
        let mut f = field(800.0, 600.0);
        assert!(f.spawn_shooting_star());
        let mut surface = RecordingSurface::default();
        // past the intro phase, still inside the viewport
        for i in 0..15 {
            f.tick(i as f64, &mut surface);
        }
        surface.rects.clear();
        f.render(&mut surface);

        let s = &f.shooting_stars()[0];
        let head = surface.rects.last().map(|r| (r.x, r.y, r.w, r.h));
        assert_eq!(head, Some((s.x.floor() as i32, s.y.floor() as i32, 2, 2)));
    }
}
