// web.rs - Browser host
//
// Canvas 2D surface plus the wasm-facing engine handle. The page owns
// device-pixel-ratio sizing, requestAnimationFrame and visibilitychange;
// it forwards them here as resize / tick / set_visible.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::StarfieldConfig;
use crate::render::{FillStyle, Surface};
use crate::rng::SeedDate;
use crate::sim::{FrameOutcome, Starfield};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Canvas 2D context drawing in logical pixels.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    w: f64,
    h: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement, w: f64, h: f64) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_image_smoothing_enabled(false);
        Ok(Self { ctx, w, h })
    }

    fn resize(&mut self, w: f64, h: f64) {
        self.w = w;
        self.h = h;
        // Resizing a canvas resets its state.
        self.ctx.set_image_smoothing_enabled(false);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.w, self.h);
    }

    fn set_fill_style(&mut self, style: &FillStyle) {
        self.ctx.set_fill_style_str(&style.css);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }
}

#[wasm_bindgen]
pub struct StarfieldApp {
    field: Starfield,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl StarfieldApp {
    /// Attach to `<canvas id=canvas_id>` with a logical viewport of `w` x `h`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, w: f64, h: f64) -> Result<StarfieldApp, JsValue> {
        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()?;

        let surface = CanvasSurface::new(&canvas, w, h)?;
        let field = Starfield::new(w, h, today(), StarfieldConfig::default());

        Ok(Self { field, surface })
    }

    /// Returns `true` if the frame was drawn.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.field.tick(now_ms, &mut self.surface) == FrameOutcome::Rendered
    }

    pub fn resize(&mut self, w: f64, h: f64) {
        self.surface.resize(w, h);
        self.field.resize(w, h);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.field.set_visible(visible, &mut self.surface);
    }

    pub fn spawn_shooting_star(&mut self) -> bool {
        self.field.spawn_shooting_star()
    }

    // Accessors for JS
    pub fn star_count(&self) -> usize { self.field.stars().len() }
    pub fn shooting_star_count(&self) -> usize { self.field.shooting_stars().len() }
    pub fn seed_key(&self) -> String { self.field.seed_key().to_owned() }
}

/// Local calendar day from the browser clock.
fn today() -> SeedDate {
    let now = js_sys::Date::new_0();
    SeedDate::new(now.get_full_year() as i32, now.get_month(), now.get_date())
}
