// render.rs - Draw simulation state onto a pixel surface
//
// Draw order per frame:
//   clear
//   static stars
//   shooting stars (tail, shimmer, head)
//
// Every alpha is multiplied by the horizon fade. Anything under
// MIN_VISIBLE_ALPHA is skipped. Fill style only changes when the alpha,
// rounded to ALPHA_STEPS, actually differs from the current one.

use crate::sim::{ShootingStar, Star, StarKind};
use crate::world::horizon_fade;

pub const MIN_VISIBLE_ALPHA: f64 = 0.01;
const ALPHA_STEPS: f64 = 100.0;
const STYLE_SLOTS: usize = ALPHA_STEPS as usize + 1;

/// White at a fixed alpha, plus its CSS form for canvas backends.
#[derive(Clone, Debug, PartialEq)]
pub struct FillStyle {
    pub alpha: f64,
    pub css: String,
}

impl FillStyle {
    fn white(alpha: f64) -> Self {
        Self {
            alpha,
            css: format!("rgba(255, 255, 255, {alpha:.2})"),
        }
    }
}

/// Pixel-exact drawing target. Implementations must not smooth or
/// interpolate.
pub trait Surface {
    fn clear(&mut self);
    fn set_fill_style(&mut self, style: &FillStyle);
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32);
}

/// Rounded alpha -> previously built style.
struct StyleCache {
    slots: Vec<Option<FillStyle>>,
}

impl StyleCache {
    fn new() -> Self {
        Self { slots: vec![None; STYLE_SLOTS] }
    }

    fn get(&mut self, key: usize) -> &FillStyle {
        self.slots[key].get_or_insert_with(|| FillStyle::white(key as f64 / ALPHA_STEPS))
    }
}

pub struct Renderer {
    cache: StyleCache,
    current: Option<usize>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            cache: StyleCache::new(),
            current: None,
        }
    }

    /// Full frame. Reads state only.
    pub fn draw<S: Surface>(
        &mut self,
        surface: &mut S,
        stars: &[Star],
        shooting: &[ShootingStar],
        width: f64,
        height: f64,
    ) {
        surface.clear();
        self.current = None;

        if width <= 0.0 || height <= 0.0 {
            return;
        }

        for star in stars {
            self.draw_star(surface, star, height);
        }
        for s in shooting {
            self.draw_shooting_star(surface, s, width, height);
        }
    }

    fn draw_star<S: Surface>(&mut self, surface: &mut S, star: &Star, height: f64) {
        let alpha = star.brightness * horizon_fade(star.y, height);
        if !self.use_alpha(surface, alpha) {
            return;
        }

        let x = star.x.floor() as i32;
        let y = star.y.floor() as i32;
        match star.kind {
            StarKind::Pixel1x1 => surface.fill_rect(x, y, 1, 1),
            StarKind::Pixel2x2 => surface.fill_rect(x, y, 2, 2),
            StarKind::Plus3x3 => {
                surface.fill_rect(x - 1, y, 3, 1);
                surface.fill_rect(x, y - 1, 1, 3);
            }
        }
    }

    fn draw_shooting_star<S: Surface>(
        &mut self,
        surface: &mut S,
        s: &ShootingStar,
        width: f64,
        height: f64,
    ) {
        let flying = s.in_flight(width, height);

        if flying {
            for px in s.tail() {
                self.plot(surface, px.x, px.y, px.alpha, height);
            }
        }

        for px in &s.shimmer {
            self.plot(surface, px.x, px.y, px.alpha, height);
        }

        if flying {
            let alpha = s.alpha() * horizon_fade(s.y, height);
            if self.use_alpha(surface, alpha) {
                surface.fill_rect(s.x.floor() as i32, s.y.floor() as i32, 2, 2);
            }
        }
    }

    #[inline]
    fn plot<S: Surface>(&mut self, surface: &mut S, x: f64, y: f64, alpha: f64, height: f64) {
        if self.use_alpha(surface, alpha * horizon_fade(y, height)) {
            surface.fill_rect(x.floor() as i32, y.floor() as i32, 1, 1);
        }
    }

    /// Switch fill style if needed. `false` means skip the draw.
    fn use_alpha<S: Surface>(&mut self, surface: &mut S, alpha: f64) -> bool {
        if alpha.is_nan() || alpha < MIN_VISIBLE_ALPHA {
            return false;
        }
        let key = (alpha.min(1.0) * ALPHA_STEPS).round() as usize;
        if self.current != Some(key) {
            surface.set_fill_style(self.cache.get(key));
            self.current = Some(key);
        }
        true
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{FillStyle, Surface};

    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct Rect {
        pub x: i32,
        pub y: i32,
        pub w: u32,
        pub h: u32,
        pub alpha: f64,
    }

    /// Records every call for assertions.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub clears: usize,
        pub styles: Vec<FillStyle>,
        pub rects: Vec<Rect>,
        alpha: f64,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.clears += 1;
        }

        fn set_fill_style(&mut self, style: &FillStyle) {
            self.alpha = style.alpha;
            self.styles.push(style.clone());
        }

        fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32) {
            self.rects.push(Rect { x, y, w, h, alpha: self.alpha });
        }
    }
}
