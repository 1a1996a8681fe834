//! Strength sweep command.

use anyhow::Result;
use causal_sim::{StrengthSweep, SweepKind, SweepPoint};
use causal_sim_config::OutputFormat;

use super::{ConfigSource, GenerationArgs, OutputArgs};
use crate::style::{self, fmt_stat};

/// Sweep settings given on the command line.
pub struct SweepOverrides {
    pub kind: Option<SweepKind>,
    pub strengths: Option<Vec<f64>>,
    pub seeds: Option<u32>,
    pub first_seed: Option<i64>,
}

/// Runs a strength sweep and prints one row per strength.
pub fn run(
    source: &ConfigSource,
    overrides: SweepOverrides,
    generation: &GenerationArgs,
    output: &OutputArgs,
) -> Result<()> {
    let config = super::resolve(source, generation, output, |config| {
        let sweep = &mut config.sweep;
        if let Some(kind) = overrides.kind {
            sweep.kind = kind;
        }
        if let Some(strengths) = overrides.strengths {
            sweep.strengths = strengths;
        }
        if let Some(seeds) = overrides.seeds {
            sweep.seeds = seeds;
        }
        if let Some(first_seed) = overrides.first_seed {
            sweep.first_seed = first_seed;
        }
    })?;

    let points = StrengthSweep::new(config.sweep.kind, config.generation.clone())
        .with_strengths(config.sweep.strengths.clone())
        .with_seeds(config.sweep.seed_list())
        .run();

    match config.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&points)?),
        OutputFormat::Table => {
            let label = match config.sweep.kind {
                SweepKind::Confounding => "Confounding sweep",
                SweepKind::Selection => "Selection sweep",
            };
            style::print_title(&format!(
                "{label}: true effect {}, {} units, {} seeds",
                fmt_stat(config.generation.treatment_effect),
                config.generation.n,
                config.sweep.seeds
            ));
            let rows: Vec<Vec<String>> = points.iter().map(point_row).collect();
            style::print_data_table(
                &["strength", "mean naive estimate", "mean |bias|", "mean units"],
                &rows,
                rows.len(),
            );
        }
    }
    Ok(())
}

fn point_row(point: &SweepPoint) -> Vec<String> {
    vec![
        format!("{:.2}", point.strength),
        fmt_stat(point.mean_naive_estimate),
        fmt_stat(point.mean_abs_bias),
        format!("{:.1}", point.mean_sample_size),
    ]
}
