// Noise injector: independent Gaussian jitter on every channel of every pixel.
// new = clamp(value + sigma * g, 0, 255), g ~ N(0, 1), rounded to the nearest integer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::config::NoiseConfig;
use crate::types::Canvas;

/// Return a perturbed copy of `canvas`; the input is left untouched.
/// One fresh draw per (pixel, channel). Alpha is skipped when `include_alpha` is false.
pub fn add_gaussian_noise<R: Rng + ?Sized>(
    canvas: &Canvas,
    sigma: f64,
    include_alpha: bool,
    rng: &mut R,
) -> Canvas {
    let channels = if include_alpha { 4 } else { 3 };
    let mut out = canvas.clone();
    for px in out.pixels_mut() {
        for c in 0..channels {
            let g: f64 = rng.sample(StandardNormal);
            let v = px[c] as f64 + sigma * g;
            px[c] = v.clamp(0.0, 255.0).round() as u8;
        }
    }
    out
}

/// Owns the random source so successive samples draw from one stream.
pub struct NoiseInjector {
    rng: StdRng,
    include_alpha: bool,
}

impl NoiseInjector {
    pub fn new(config: &NoiseConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed, config.include_alpha),
            None => Self::from_os_rng(config.include_alpha),
        }
    }

    /// Reproducible stream.
    pub fn seeded(seed: u64, include_alpha: bool) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), include_alpha }
    }

    pub fn from_os_rng(include_alpha: bool) -> Self {
        Self { rng: StdRng::from_os_rng(), include_alpha }
    }

    pub fn apply(&mut self, canvas: &Canvas, sigma: f64) -> Canvas {
        log::debug!(
            "noise sigma={sigma} on {}x{} (alpha: {})",
            canvas.width(),
            canvas.height(),
            self.include_alpha
        );
        add_gaussian_noise(canvas, sigma, self.include_alpha, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gray(w: u32, h: u32, v: u8) -> Canvas {
        Canvas::from_pixel(w, h, Rgba([v, v, v, 255]))
    }

    #[test]
    fn zero_sigma_is_identity() {
        let mut c = gray(9, 7, 128);
        c.put_pixel(0, 0, Rgba([0, 10, 255, 3]));
        let mut inj = NoiseInjector::seeded(1, true);
        assert_eq!(inj.apply(&c, 0.0), c);
    }

    #[test]
    fn dimensions_are_preserved() {
        let mut inj = NoiseInjector::seeded(2, true);
        let out = inj.apply(&gray(13, 5, 90), 12.0);
        assert_eq!(out.dimensions(), (13, 5));
    }

    #[test]
    fn huge_sigma_stays_in_range_and_saturates() {
        let mut inj = NoiseInjector::seeded(3, true);
        let out = inj.apply(&gray(32, 32, 128), 1.0e6);
        let values: Vec<u8> = out.pixels().flat_map(|p| p.0).collect();
        // u8 already bounds the range; with this sigma nearly everything is pinned to an end.
        let pinned = values.iter().filter(|&&v| v == 0 || v == 255).count();
        assert!(pinned > values.len() * 9 / 10);
        assert!(values.contains(&0) && values.contains(&255));
    }

    #[test]
    fn same_seed_same_noise() {
        let c = gray(16, 16, 128);
        let a = NoiseInjector::seeded(42, true).apply(&c, 5.0);
        let b = NoiseInjector::seeded(42, true).apply(&c, 5.0);
        let other = NoiseInjector::seeded(43, true).apply(&c, 5.0);
        assert_eq!(a, b);
        assert_ne!(a, other);
    }

    #[test]
    fn mid_gray_variance_matches_sigma() {
        let c = gray(64, 64, 128);
        let out = NoiseInjector::seeded(7, false).apply(&c, 5.0);
        let diffs: Vec<f64> = out
            .pixels()
            .flat_map(|p| p.0[..3].to_vec())
            .map(|v| v as f64 - 128.0)
            .collect();
        let n = diffs.len() as f64;
        let mean = diffs.iter().sum::<f64>() / n;
        let var = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
        assert!(mean.abs() < 0.5, "mean {mean}");
        assert!((20.0..30.0).contains(&var), "variance {var}");
    }

    #[test]
    fn channels_draw_independently() {
        let out = NoiseInjector::seeded(11, true).apply(&gray(32, 32, 128), 20.0);
        // With a shared draw per pixel R, G and B would always move together.
        assert!(out.pixels().any(|p| p[0] != p[1] || p[1] != p[2]));
    }

    #[test]
    fn alpha_untouched_when_excluded() {
        let out = NoiseInjector::seeded(5, false).apply(&gray(20, 20, 128), 50.0);
        assert!(out.pixels().all(|p| p[3] == 255));
    }
}
