// horizon.rs - Vertical fade toward the skyline
//
// 1.0 above FADE_START of the height, linear down to 0.0 at FADE_END,
// 0.0 below. Multiplied into every drawn alpha.

pub const FADE_START: f64 = 0.1;
pub const FADE_END: f64 = 0.99;

/// Horizon fade at vertical position `y` for a viewport of `height`.
#[inline]
pub fn horizon_fade(y: f64, height: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }

    let start = height * FADE_START;
    let end = height * FADE_END;

    if y <= start {
        1.0
    } else if y >= end {
        0.0
    } else {
        1.0 - (y - start) / (end - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_above_band() {
        let h = 600.0;
        for y in 0..60 {
            assert_eq!(horizon_fade(y as f64, h), 1.0);
        }
        assert_eq!(horizon_fade(-25.0, h), 1.0);
    }

    #[test]
    fn zero_at_and_below_end() {
        let h = 600.0;
        assert_eq!(horizon_fade(h * FADE_END, h), 0.0);
        assert_eq!(horizon_fade(599.0, h), 0.0);
        assert_eq!(horizon_fade(1_000.0, h), 0.0);
    }

    #[test]
    fn monotone_inside_band() {
        let h = 777.0;
        let mut prev = horizon_fade(0.0, h);
        let mut y = 0.0;
        while y < h {
            let f = horizon_fade(y, h);
            assert!(f <= prev);
            assert!((0.0..=1.0).contains(&f));
            prev = f;
            y += 0.5;
        }
    }

    #[test]
    fn midpoint_of_band() {
        let h = 1000.0;
        let mid = (FADE_START + FADE_END) * 0.5 * h;
        assert!((horizon_fade(mid, h) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_height_draws_nothing() {
        assert_eq!(horizon_fade(0.0, 0.0), 0.0);
    }
}
