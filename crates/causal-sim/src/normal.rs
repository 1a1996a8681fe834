//! Normal variates via the Box-Muller transform.
//!
//! `u1 = 0` would make `ln(u1)` infinite, so such draws are resampled rather
//! than substituted with an epsilon. With a seeded source the retry is as
//! deterministic as every other draw.

use std::f64::consts::PI;

use crate::rng::RandomSource;

/// Draws a value from `N(mean, std²)`.
///
/// Consumes two uniform draws (more only if the first is exactly zero).
#[inline]
pub fn random_normal<R: RandomSource + ?Sized>(mean: f64, std: f64, rng: &mut R) -> f64 {
    let u1 = nonzero_uniform(rng);
    let u2 = rng.next_f64();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos() * std + mean
}

/// Draws a value from the standard normal distribution.
#[inline]
pub fn standard_normal<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    random_normal(0.0, 1.0, rng)
}

/// Draws two independent standard normal values from one pair of uniforms.
///
/// The first element equals what [`standard_normal`] would return for the
/// same source state.
pub fn standard_normal_pair<R: RandomSource + ?Sized>(rng: &mut R) -> (f64, f64) {
    let u1 = nonzero_uniform(rng);
    let u2 = rng.next_f64();
    let radius = (-2.0 * u1.ln()).sqrt();
    let angle = 2.0 * PI * u2;
    (radius * angle.cos(), radius * angle.sin())
}

fn nonzero_uniform<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u = rng.next_f64();
        if u > 0.0 {
            return u;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::LcgRng;

    /// Replays a fixed list of uniforms, cycling.
    struct Scripted {
        values: Vec<f64>,
        cursor: usize,
    }

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let value = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            value
        }
    }

    #[test]
    fn seeded_normal_is_pinned() {
        let mut rng = LcgRng::new(42);
        let z = standard_normal(&mut rng);

        assert!((z - (-0.800_481_311_929_203)).abs() < 1e-12, "z = {z}");
    }

    #[test]
    fn zero_uniform_is_resampled() {
        let mut rng = Scripted {
            values: vec![0.0, 0.0, 0.25, 0.0],
            cursor: 0,
        };

        let z = standard_normal(&mut rng);

        // u1 = 0.25 after two rejections, u2 = 0.0 so cos = 1.
        let expected = (-2.0 * 0.25_f64.ln()).sqrt();
        assert!((z - expected).abs() < 1e-12);
        assert_eq!(rng.cursor, 4);
    }

    #[test]
    fn mean_and_std_are_applied() {
        let mut a = LcgRng::new(3);
        let mut b = LcgRng::new(3);

        let z = standard_normal(&mut a);
        let x = random_normal(50.0, 10.0, &mut b);

        assert!((x - (z * 10.0 + 50.0)).abs() < 1e-9);
    }

    #[test]
    fn pair_first_matches_single() {
        let mut a = LcgRng::new(11);
        let mut b = LcgRng::new(11);

        let (first, second) = standard_normal_pair(&mut a);
        let single = standard_normal(&mut b);

        assert!((first - single).abs() < 1e-12);
        assert!(second.is_finite());
    }

    #[test]
    fn sample_moments_are_standard() {
        let mut rng = LcgRng::new(2024);
        let n = 50_000;
        let samples: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();

        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(mean.abs() < 0.03, "mean = {mean}");
        assert!((variance - 1.0).abs() < 0.05, "variance = {variance}");
    }

    #[test]
    fn zero_std_returns_mean() {
        let mut rng = LcgRng::new(5);
        assert_eq!(random_normal(7.5, 0.0, &mut rng), 7.5);
    }
}
