// surface.rs - RGBA image surface
//
// White at the current alpha, composited over opaque black.

use image::{Rgba, RgbaImage};
use starfield_engine::{FillStyle, Surface};

pub struct ImageSurface {
    img: RgbaImage,
    alpha: f64,
}

impl ImageSurface {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            img: RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255])),
            alpha: 1.0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }
}

impl Surface for ImageSurface {
    fn clear(&mut self) {
        for px in self.img.pixels_mut() {
            *px = Rgba([0, 0, 0, 255]);
        }
    }

    fn set_fill_style(&mut self, style: &FillStyle) {
        self.alpha = style.alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32) {
        let (iw, ih) = (self.img.width() as i64, self.img.height() as i64);
        let x0 = (x as i64).clamp(0, iw);
        let y0 = (y as i64).clamp(0, ih);
        let x1 = (x as i64 + w as i64).clamp(0, iw);
        let y1 = (y as i64 + h as i64).clamp(0, ih);

        for py in y0..y1 {
            for px in x0..x1 {
                let p = self.img.get_pixel_mut(px as u32, py as u32);
                for c in &mut p.0[..3] {
                    let v = *c as f64;
                    *c = (v + (255.0 - v) * self.alpha).round() as u8;
                }
            }
        }
    }
}
