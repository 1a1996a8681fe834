//! Strength sweeps: how the naive estimate drifts as bias grows.
//!
//! For each strength, one seeded dataset per seed is generated, passed through
//! the chosen injector, and estimated. Seeds run in parallel on rayon's pool.
//! Each task owns its own generator, so results do not depend on scheduling.

use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bias::{add_confounding, add_selection_bias, clamp_strength};
use crate::estimate::calculate_naive_estimate;
use crate::generate::{GenerationConfig, generate_data};

/// Which injector a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SweepKind {
    Confounding,
    Selection,
}

impl FromStr for SweepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confounding" => Ok(Self::Confounding),
            "selection" => Ok(Self::Selection),
            other => Err(format!(
                "unknown sweep kind '{other}' (expected confounding or selection)"
            )),
        }
    }
}

/// A sweep over injector strengths, averaged across seeds.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthSweep {
    pub kind: SweepKind,
    /// Strengths to evaluate, clamped into `[0, 1]` when run.
    pub strengths: Vec<f64>,
    pub seeds: Vec<i64>,
    /// Base generation parameters. Its `seed` is replaced per run.
    pub generation: GenerationConfig,
}

/// Aggregates for one strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepPoint {
    pub strength: f64,
    pub mean_naive_estimate: f64,
    /// Mean of `|naive - true|` over seeds.
    pub mean_abs_bias: f64,
    /// Mean number of units left after injection.
    pub mean_sample_size: f64,
}

impl StrengthSweep {
    pub fn new(kind: SweepKind, generation: GenerationConfig) -> Self {
        Self {
            kind,
            strengths: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            seeds: (1..=20).collect(),
            generation,
        }
    }

    pub fn with_strengths(mut self, strengths: Vec<f64>) -> Self {
        self.strengths = strengths;
        self
    }

    pub fn with_seeds(mut self, seeds: Vec<i64>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Runs the sweep. Returns one point per strength, in input order.
    ///
    /// With no seeds every aggregate is 0.
    pub fn run(&self) -> Vec<SweepPoint> {
        info!(
            kind = ?self.kind,
            strengths = self.strengths.len(),
            seeds = self.seeds.len(),
            n = self.generation.n,
            "running strength sweep"
        );

        self.strengths
            .iter()
            .map(|&strength| self.evaluate(clamp_strength(strength)))
            .collect()
    }

    fn evaluate(&self, strength: f64) -> SweepPoint {
        let truth = self.generation.treatment_effect;
        let runs: Vec<(f64, usize)> = self
            .seeds
            .par_iter()
            .map(|&seed| {
                let config = GenerationConfig {
                    seed: Some(seed),
                    ..self.generation.clone()
                };
                let base = generate_data(&config);
                let biased = match self.kind {
                    SweepKind::Confounding => add_confounding(&base, strength),
                    SweepKind::Selection => add_selection_bias(&base, strength),
                };
                (calculate_naive_estimate(&biased), biased.len())
            })
            .collect();

        if runs.is_empty() {
            return SweepPoint {
                strength,
                mean_naive_estimate: 0.0,
                mean_abs_bias: 0.0,
                mean_sample_size: 0.0,
            };
        }

        let count = runs.len() as f64;
        let (sum_estimate, sum_abs_bias, sum_size) = runs.iter().fold(
            (0.0, 0.0, 0.0),
            |(estimate, abs_bias, size), &(naive, len)| {
                (
                    estimate + naive,
                    abs_bias + (naive - truth).abs(),
                    size + len as f64,
                )
            },
        );

        SweepPoint {
            strength,
            mean_naive_estimate: sum_estimate / count,
            mean_abs_bias: sum_abs_bias / count,
            mean_sample_size: sum_size / count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_point_per_strength_in_order() {
        let sweep = StrengthSweep::new(SweepKind::Selection, GenerationConfig::new(100, 5.0))
            .with_strengths(vec![0.5, 0.0, 1.0])
            .with_seeds(vec![1, 2]);

        let points = sweep.run();

        let strengths: Vec<f64> = points.iter().map(|p| p.strength).collect();
        assert_eq!(strengths, vec![0.5, 0.0, 1.0]);
    }

    #[test]
    fn no_seeds_yields_zero_aggregates() {
        let sweep = StrengthSweep::new(SweepKind::Confounding, GenerationConfig::new(100, 5.0))
            .with_strengths(vec![0.3])
            .with_seeds(Vec::new());

        let points = sweep.run();

        assert_eq!(points[0].mean_abs_bias, 0.0);
        assert_eq!(points[0].mean_sample_size, 0.0);
    }

    #[test]
    fn out_of_range_strengths_are_clamped() {
        let sweep = StrengthSweep::new(SweepKind::Confounding, GenerationConfig::new(10, 5.0))
            .with_strengths(vec![-1.0, 3.0])
            .with_seeds(vec![1]);

        let points = sweep.run();

        assert_eq!(points[0].strength, 0.0);
        assert_eq!(points[1].strength, 1.0);
    }

    #[test]
    fn parallel_sweep_is_reproducible() {
        let sweep = StrengthSweep::new(SweepKind::Confounding, GenerationConfig::new(300, 5.0));

        assert_eq!(sweep.run(), sweep.run());
    }

    #[test]
    fn confounding_sweep_keeps_sample_size() {
        let sweep = StrengthSweep::new(SweepKind::Confounding, GenerationConfig::new(120, 5.0))
            .with_seeds(vec![4, 5]);

        assert!(sweep.run().iter().all(|p| p.mean_sample_size == 120.0));
    }

    #[test]
    fn sweep_kind_parses() {
        assert_eq!("Confounding".parse::<SweepKind>(), Ok(SweepKind::Confounding));
        assert_eq!("selection".parse::<SweepKind>(), Ok(SweepKind::Selection));
        assert!("other".parse::<SweepKind>().is_err());
    }
}
