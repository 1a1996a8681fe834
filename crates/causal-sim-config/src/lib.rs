//! Configuration management for causal-sim
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. CLI arguments (highest precedence, applied by the caller)
//! 2. Environment variables (CSIM_* prefix, `__` between section and key)
//! 3. causal-sim.local.toml (gitignored, local overrides)
//! 4. causal-sim.toml (git-tracked, project config)
//! 5. ~/.config/causal-sim/config.toml (user defaults)
//! 6. Built-in defaults (lowest precedence)

#![cfg_attr(test, allow(clippy::float_cmp))]

use causal_sim::{
    DEFAULT_CONFOUNDING_STRENGTH, DEFAULT_SELECTION_STRENGTH, GenerationConfig, SweepKind,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main causal-sim configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub generation: GenerationConfig,
    pub bias: BiasConfig,
    pub sweep: SweepConfig,
    pub output: OutputConfig,
}

/// Injector strengths used by `run`.
///
/// `generate` ignores this section and injects only the strengths passed as
/// `--confounding` / `--selection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasConfig {
    pub confounding_strength: f64,
    pub selection_strength: f64,
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self {
            confounding_strength: DEFAULT_CONFOUNDING_STRENGTH,
            selection_strength: DEFAULT_SELECTION_STRENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub kind: SweepKind,
    pub strengths: Vec<f64>,
    /// Number of seeds per strength, numbered from `first_seed`.
    pub seeds: u32,
    pub first_seed: i64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            kind: SweepKind::Confounding,
            strengths: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            seeds: 20,
            first_seed: 1,
        }
    }
}

impl SweepConfig {
    /// Seeds `first_seed .. first_seed + seeds`.
    pub fn seed_list(&self) -> Vec<i64> {
        (0..i64::from(self.seeds))
            .map(|offset| self.first_seed.wrapping_add(offset))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Rows of a dataset shown in table output.
    pub limit: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            limit: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Table,
    Json,
}

impl SimConfig {
    /// Read a single TOML file, without layering.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges the engine would otherwise silently clamp or
    /// propagate as NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generation = &self.generation;
        for (name, value) in [
            ("generation.treatment_effect", generation.treatment_effect),
            ("generation.base_outcome", generation.base_outcome),
            ("generation.noise", generation.noise),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if generation.noise < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "generation.noise must be non-negative, got {}",
                generation.noise
            )));
        }

        let strengths = [
            ("bias.confounding_strength", self.bias.confounding_strength),
            ("bias.selection_strength", self.bias.selection_strength),
        ]
        .into_iter()
        .chain(
            self.sweep
                .strengths
                .iter()
                .map(|&s| ("sweep.strengths", s)),
        );
        for (name, value) in strengths {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.sweep.strengths.is_empty() {
            return Err(ConfigError::ValidationError(
                "sweep.strengths must not be empty".to_string(),
            ));
        }
        if self.sweep.seeds == 0 {
            return Err(ConfigError::ValidationError(
                "sweep.seeds must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
