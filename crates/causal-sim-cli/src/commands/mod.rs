//! CLI command implementations.

pub mod config;
pub mod generate;
pub mod scenarios;
pub mod sweep;
pub mod version;

use std::path::PathBuf;

use anyhow::{Context, Result};
use causal_sim_config::{ConfigLoader, OutputFormat, SimConfig};
use clap::{Args, ValueEnum};

/// Where configuration comes from.
pub struct ConfigSource {
    pub project_dir: PathBuf,
    /// Explicit file; bypasses layering when set.
    pub file: Option<PathBuf>,
}

impl ConfigSource {
    /// Loads the configuration this source points at.
    pub fn load(&self) -> Result<SimConfig> {
        match &self.file {
            Some(path) => SimConfig::from_file(path)
                .with_context(|| format!("Failed to load {}", path.display())),
            None => ConfigLoader::new()
                .with_project_dir(&self.project_dir)
                .load()
                .context("Failed to load configuration"),
        }
    }
}

/// Generation parameters that override configuration.
#[derive(Args, Debug, Default)]
pub struct GenerationArgs {
    /// Number of units.
    #[arg(short = 'n', long)]
    pub units: Option<usize>,

    /// True treatment effect.
    #[arg(short, long, allow_hyphen_values = true)]
    pub effect: Option<f64>,

    /// Baseline outcome of untreated units.
    #[arg(long, allow_hyphen_values = true)]
    pub base_outcome: Option<f64>,

    /// Standard deviation of outcome noise.
    #[arg(long, allow_hyphen_values = true)]
    pub noise: Option<f64>,

    /// Seed for reproducible generation.
    #[arg(short, long, allow_hyphen_values = true)]
    pub seed: Option<i64>,
}

impl GenerationArgs {
    fn apply(&self, config: &mut SimConfig) {
        let generation = &mut config.generation;
        if let Some(units) = self.units {
            generation.n = units;
        }
        if let Some(effect) = self.effect {
            generation.treatment_effect = effect;
        }
        if let Some(base) = self.base_outcome {
            generation.base_outcome = base;
        }
        if let Some(noise) = self.noise {
            generation.noise = noise;
        }
        if self.seed.is_some() {
            generation.seed = self.seed;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Output options that override configuration.
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output format.
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Rows of the dataset to print in table output.
    #[arg(long)]
    pub limit: Option<usize>,
}

impl OutputArgs {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        if let Some(limit) = self.limit {
            config.output.limit = limit;
        }
    }
}

/// Loads configuration, applies command-line overrides, and re-validates.
pub fn resolve(
    source: &ConfigSource,
    generation: &GenerationArgs,
    output: &OutputArgs,
    customize: impl FnOnce(&mut SimConfig),
) -> Result<SimConfig> {
    let mut config = source.load()?;
    generation.apply(&mut config);
    output.apply(&mut config);
    customize(&mut config);
    config.validate().context("Invalid command-line arguments")?;
    Ok(config)
}
