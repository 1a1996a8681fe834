//! Dataset generation command.

use anyhow::Result;
use causal_sim::{
    DataPoint, Dataset, add_confounding, add_selection_bias, calculate_naive_estimate,
    calculate_summary_stats, generate_data,
};
use causal_sim_config::OutputFormat;
use serde_json::json;

use super::{ConfigSource, GenerationArgs, OutputArgs};
use crate::style::{self, fmt_stat};

const COLUMNS: [&str; 5] = ["id", "treated", "outcome", "confounder", "propensity"];

/// Generates a dataset, applies any requested injectors, and prints it.
///
/// Injectors run only when their flag is given. The configured `[bias]`
/// strengths belong to `run`, so a plain `generate` stays randomized.
pub fn run(
    source: &ConfigSource,
    generation: &GenerationArgs,
    confounding: Option<f64>,
    selection: Option<f64>,
    output: &OutputArgs,
) -> Result<()> {
    let config = super::resolve(source, generation, output, |config| {
        if let Some(strength) = confounding {
            config.bias.confounding_strength = strength;
        }
        if let Some(strength) = selection {
            config.bias.selection_strength = strength;
        }
    })?;

    let mut dataset = generate_data(&config.generation);
    if confounding.is_some() {
        dataset = add_confounding(&dataset, config.bias.confounding_strength);
    }
    if selection.is_some() {
        dataset = add_selection_bias(&dataset, config.bias.selection_strength);
    }

    match config.output.format {
        OutputFormat::Json => print_json(&dataset),
        OutputFormat::Table => {
            print_table(&dataset, config.output.limit);
            Ok(())
        }
    }
}

fn print_json(dataset: &Dataset) -> Result<()> {
    let value = json!({
        "treatmentEffect": dataset.treatment_effect(),
        "naiveEstimate": calculate_naive_estimate(dataset),
        "summary": calculate_summary_stats(dataset),
        "points": dataset.points(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_table(dataset: &Dataset, limit: usize) {
    let rows: Vec<Vec<String>> = dataset.iter().take(limit).map(point_row).collect();
    style::print_data_table(&COLUMNS, &rows, dataset.len());
    style::print_spacer();

    let summary = calculate_summary_stats(dataset);
    style::print_info_table(&[
        ("Units", summary.n.to_string()),
        ("Treated", summary.n_treated.to_string()),
        ("Untreated", summary.n_untreated.to_string()),
        ("Mean outcome", fmt_stat(summary.mean_outcome)),
        ("Treated proportion", fmt_stat(summary.treatment_proportion)),
        ("True effect", fmt_stat(dataset.treatment_effect())),
        ("Naive estimate", fmt_stat(calculate_naive_estimate(dataset))),
    ]);
}

fn point_row(point: &DataPoint) -> Vec<String> {
    let optional = |value: Option<f64>| value.map_or_else(|| "-".to_string(), fmt_stat);
    vec![
        point.id.to_string(),
        point.treatment_indicator().to_string(),
        fmt_stat(point.outcome),
        optional(point.confounder),
        optional(point.propensity_score),
    ]
}
