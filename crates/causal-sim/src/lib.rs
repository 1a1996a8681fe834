//! # causal-sim: Synthetic Data for Causal Inference Lessons
//!
//! This crate generates small synthetic experiments, biases them on purpose,
//! and measures how far a naive difference-in-means estimate drifts from the
//! truth.
//!
//! ## Pipeline
//!
//! ```text
//! GenerationConfig ──> generate_data ──> Dataset
//!                                          │
//!                     add_confounding ─────┤  (zero or more injectors)
//!                     add_selection_bias ──┤
//!                                          ▼
//!                 calculate_naive_estimate / calculate_summary_stats
//! ```
//!
//! Every stage is a pure function. Randomness comes from an explicit
//! [`RandomSource`]: a seeded [`LcgRng`] for reproducible runs or an
//! [`EntropyRng`] when no seed is given. Injectors key their draws on point
//! ids, so they are deterministic even without a seed.
//!
//! ## Quick Start
//!
//! ```
//! use causal_sim::{GenerationConfig, add_confounding, calculate_naive_estimate, generate_data};
//!
//! let config = GenerationConfig::new(2_000, 5.0).with_seed(42);
//! let randomized = generate_data(&config);
//! let confounded = add_confounding(&randomized, 1.0);
//!
//! // Confounding pushes the naive estimate well above the true effect of 5.
//! assert!(calculate_naive_estimate(&confounded) > calculate_naive_estimate(&randomized));
//! ```
//!
//! ## Degenerate inputs
//!
//! Nothing here returns an error. Empty datasets and empty treatment groups
//! produce zero-valued statistics; out-of-range strengths are clamped.

#![cfg_attr(test, allow(clippy::float_cmp))] // Test assertions pin exact seeded values

mod bias;
mod data;
mod estimate;
mod generate;
mod normal;
mod rng;
pub mod scenarios;
pub mod sweep;

pub use bias::{
    CONFOUNDING_SALT, MAX_PROPENSITY, MAX_RETENTION, MIN_PROPENSITY, MIN_RETENTION,
    SELECTION_SALT, add_confounding, add_selection_bias, clamp_strength, propensity_score,
    retention_probability,
};
pub use data::{DataPoint, Dataset};
pub use estimate::{
    SummaryStats, calculate_ate, calculate_naive_estimate, calculate_summary_stats,
    estimation_bias,
};
pub use generate::{
    DEFAULT_BASE_OUTCOME, DEFAULT_NOISE, GenerationConfig, generate_data, generate_data_with,
};
pub use normal::{random_normal, standard_normal, standard_normal_pair};
pub use rng::{
    EntropyRng, LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER, LcgRng, RandomSource, unit_seed,
};
pub use scenarios::{
    DEFAULT_CONFOUNDING_STRENGTH, DEFAULT_SELECTION_STRENGTH, ScenarioConfig, ScenarioKind,
    ScenarioReport, UnknownScenario,
};
pub use sweep::{StrengthSweep, SweepKind, SweepPoint};
