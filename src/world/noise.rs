// noise.rs - Seeded 2D simplex noise
//
// Lattice is a permutation table shuffled once from the seeded stream.
// After construction the field is read-only.

use crate::rng::SeededRng;

const F2: f64 = 0.366_025_403_784_438_6; // (sqrt(3) - 1) / 2
const G2: f64 = 0.211_324_865_405_187_1; // (3 - sqrt(3)) / 6

const GRAD: [(f64, f64); 12] = [
    (1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0),
    (1.0, 0.0), (-1.0, 0.0), (1.0, 0.0), (-1.0, 0.0),
    (0.0, 1.0), (0.0, -1.0), (0.0, 1.0), (0.0, -1.0),
];

pub struct NoiseField {
    perm: [u8; 512],
}

impl NoiseField {
    pub fn new(rng: &mut SeededRng) -> Self {
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        for i in (1..256).rev() {
            let j = (rng.next_f64() * (i + 1) as f64) as usize;
            table.swap(i, j.min(i));
        }

        let mut perm = [0u8; 512];
        for i in 0..512 {
            perm[i] = table[i & 255];
        }
        Self { perm }
    }

    /// Coherent noise in [-1, 1].
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;

        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;

        let n0 = self.corner(ii, jj, x0, y0);
        let n1 = self.corner(ii + i1, jj + j1, x1, y1);
        let n2 = self.corner(ii + 1, jj + 1, x2, y2);

        (70.0 * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }

    /// Noise remapped to [0, 1].
    #[inline]
    pub fn sample_unit(&self, x: f64, y: f64) -> f64 {
        (self.sample(x, y) + 1.0) * 0.5
    }

    #[inline]
    fn corner(&self, i: usize, j: usize, x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            return 0.0;
        }
        let g = GRAD[self.perm[i + self.perm[j] as usize] as usize % 12];
        let t2 = t * t;
        t2 * t2 * (g.0 * x + g.1 * y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str) -> NoiseField {
        NoiseField::new(&mut SeededRng::from_key(key))
    }

    #[test]
    fn output_is_bounded() {
        let noise = field("bounded");
        for i in 0..200 {
            for j in 0..200 {
                let v = noise.sample(i as f64 * 0.37 - 20.0, j as f64 * 0.41 - 30.0);
                assert!((-1.0..=1.0).contains(&v));
                let u = noise.sample_unit(i as f64 * 0.37, j as f64 * 0.41);
                assert!((0.0..=1.0).contains(&u));
            }
        }
    }

    #[test]
    fn deterministic_for_seed() {
        let a = field("starfield-2024-0-1");
        let b = field("starfield-2024-0-1");
        for k in 0..100 {
            let (x, y) = (k as f64 * 1.7, k as f64 * 0.3);
            assert_eq!(a.sample(x, y).to_bits(), b.sample(x, y).to_bits());
        }
    }

    #[test]
    fn nearby_inputs_are_close() {
        let noise = field("coherent");
        for k in 0..500 {
            let x = k as f64 * 0.13;
            let y = k as f64 * 0.07;
            let d = (noise.sample(x, y) - noise.sample(x + 1e-4, y + 1e-4)).abs();
            assert!(d < 0.01, "jump of {d} at ({x}, {y})");
        }
    }

    #[test]
    fn lattice_points_are_zero() {
        let noise = field("lattice");
        assert_eq!(noise.sample(0.0, 0.0), 0.0);
    }
}
