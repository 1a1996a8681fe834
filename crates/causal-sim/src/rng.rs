//! Uniform random sources for simulation.
//!
//! This module provides a trait-based abstraction over uniform `[0, 1)` draws:
//! - **Reproducible runs**: [`LcgRng`], a linear-congruential generator whose
//!   output is fully determined by an integer seed
//! - **Ad-hoc runs**: [`EntropyRng`], seeded from OS entropy
//!
//! Engine functions take `&mut impl RandomSource` (or `<R: RandomSource>`), so
//! seeded and unseeded generation share one code path.
//!
//! # Per-unit streams
//!
//! Bias injectors give every data point its own short-lived `LcgRng`, seeded
//! by [`unit_seed`] from the point's id and a per-injector salt. Re-running an
//! injector on the same input therefore reproduces the same draws.
//!
//! ```text
//! unit_seed(id = 0, salt = 42) ─> LcgRng ─> confounder, treatment draw
//! unit_seed(id = 1, salt = 42) ─> LcgRng ─> confounder, treatment draw
//! ...
//! ```

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// LCG multiplier.
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;

/// LCG increment.
pub const LCG_INCREMENT: u64 = 12_345;

/// LCG modulus, the Mersenne prime `2^31 - 1`.
pub const LCG_MODULUS: u64 = 2_147_483_647;

/// Trait for uniform random number sources.
pub trait RandomSource {
    /// Generates an `f64` in the range `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Generates a `bool` that is `true` with the given probability.
    #[inline]
    fn next_bool_with_probability(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Generates a fair coin flip.
    #[inline]
    fn next_bool(&mut self) -> bool {
        self.next_bool_with_probability(0.5)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

// ============================================================================
// Deterministic Implementation
// ============================================================================

/// Seeded linear-congruential generator.
///
/// `state = (state * 1103515245 + 12345) mod (2^31 - 1)`, output
/// `state / (2^31 - 1)`. The constants match the classic ANSI C `rand()`
/// multiplier and increment, so seeded sequences are stable across
/// reimplementations. All arithmetic is exact: the state stays below 2^31 and
/// the product below 2^62.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    /// Creates a generator from any integer seed, including 0 and negatives.
    pub fn new(seed: i64) -> Self {
        Self {
            state: seed.rem_euclid(LCG_MODULUS as i64) as u64,
        }
    }

    /// Creates a generator from an unsigned seed such as [`unit_seed`] output.
    pub fn from_unsigned(seed: u64) -> Self {
        Self {
            state: seed % LCG_MODULUS,
        }
    }

    /// Advances the recurrence and returns the next value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }
}

impl RandomSource for LcgRng {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        LcgRng::next_f64(self)
    }
}

impl Iterator for LcgRng {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        Some(LcgRng::next_f64(self))
    }
}

/// Derives the seed of a per-unit stream from a data point id.
///
/// `id * 1000 + salt` is passed through the SplitMix64 finalizer. Feeding the
/// raw affine seeds to the LCG would place the first draws of neighbouring ids
/// on a coarse lattice, correlating the successive draws each unit takes.
#[inline]
pub fn unit_seed(id: u64, salt: u64) -> u64 {
    let mut z = id
        .wrapping_mul(1000)
        .wrapping_add(salt)
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// ============================================================================
// Entropy Implementation
// ============================================================================

/// Non-reproducible source seeded from OS entropy.
///
/// Used when generation is requested without a seed.
#[derive(Debug, Clone)]
pub struct EntropyRng {
    inner: SmallRng,
}

impl EntropyRng {
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_entropy(),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRng {
    fn next_f64(&mut self) -> f64 {
        use rand::Rng as _;
        self.inner.r#gen()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_known_sequence_for_seed_42() {
        let mut rng = LcgRng::new(42);

        assert_eq!(rng.next_f64(), 0.582_307_599_756_078_6);
        assert_eq!(rng.next_f64(), 0.610_196_774_178_276_2);
        assert_eq!(rng.next_f64(), 0.755_555_882_004_814_2);
    }

    #[test]
    fn lcg_deterministic() {
        let mut rng1 = LcgRng::new(12345);
        let mut rng2 = LcgRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_f64(), rng2.next_f64());
        }
    }

    #[test]
    fn lcg_zero_seed_is_valid() {
        let mut rng = LcgRng::new(0);

        // First step from state 0 lands on the increment.
        assert_eq!(rng.next_f64(), 12_345.0 / LCG_MODULUS as f64);
        let second = rng.next_f64();
        assert!((0.0..1.0).contains(&second));
    }

    #[test]
    fn lcg_negative_seed_wraps_into_range() {
        // -1 ≡ M - 1 (mod M)
        let mut negative = LcgRng::new(-1);
        let mut wrapped = LcgRng::new((LCG_MODULUS - 1) as i64);

        for _ in 0..10 {
            let value = negative.next_f64();
            assert!((0.0..1.0).contains(&value));
            assert_eq!(value, wrapped.next_f64());
        }
    }

    #[test]
    fn lcg_extreme_seeds_stay_in_range() {
        for seed in [i64::MIN, i64::MAX, -42, LCG_MODULUS as i64] {
            let rng = LcgRng::new(seed);
            assert!(rng.take(100).all(|v| v.is_finite() && (0.0..1.0).contains(&v)));
        }
    }

    #[test]
    fn lcg_iterator_matches_next_f64() {
        let mut manual = LcgRng::new(7);
        let collected: Vec<f64> = LcgRng::new(7).take(5).collect();

        for value in collected {
            assert_eq!(value, manual.next_f64());
        }
    }

    #[test]
    fn lcg_mean_is_roughly_half() {
        let n = 100_000;
        let sum: f64 = LcgRng::new(99).take(n).sum();
        let mean = sum / n as f64;

        assert!((mean - 0.5).abs() < 0.01, "mean = {mean}");
    }

    #[test]
    fn unsigned_seed_matches_signed_seed_in_range() {
        let mut signed = LcgRng::new(1_000_000);
        let mut unsigned = LcgRng::from_unsigned(1_000_000);

        assert_eq!(signed.next_f64(), unsigned.next_f64());
    }

    #[test]
    fn unit_seeds_differ_per_id_and_salt() {
        assert_ne!(unit_seed(0, 42), unit_seed(1, 42));
        assert_ne!(unit_seed(5, 42), unit_seed(5, 7919));
        assert_eq!(unit_seed(5, 42), unit_seed(5, 42));
    }

    #[test]
    fn next_bool_with_probability_extremes() {
        let mut rng = LcgRng::new(12345);

        for _ in 0..10 {
            assert!(!rng.next_bool_with_probability(0.0));
        }
        for _ in 0..10 {
            assert!(rng.next_bool_with_probability(1.0));
        }
    }

    #[test]
    fn entropy_rng_in_range() {
        let mut rng = EntropyRng::new();

        for _ in 0..1000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn generic_usage_through_mut_ref() {
        fn draw<R: RandomSource>(mut rng: R) -> f64 {
            rng.next_f64()
        }

        let mut rng = LcgRng::new(42);
        let first = draw(&mut rng);
        let second = draw(&mut rng);

        assert_ne!(first, second);
    }
}
