//! Scenario listing and execution.

use anyhow::Result;
use causal_sim::{ScenarioConfig, ScenarioKind, ScenarioReport};
use causal_sim_config::OutputFormat;
use serde_json::json;

use super::{ConfigSource, GenerationArgs, OutputArgs};
use crate::style::{self, colors::SemanticStyle, fmt_stat};

/// Absolute bias above which the result is flagged.
const BIAS_WARNING_THRESHOLD: f64 = 1.0;

/// Lists preset scenarios.
pub fn list() {
    let rows: Vec<Vec<String>> = ScenarioKind::all()
        .iter()
        .map(|kind| {
            vec![
                kind.slug().code(),
                kind.name().to_string(),
                kind.description().to_string(),
            ]
        })
        .collect();

    style::print_data_table(&["scenario", "name", "description"], &rows, rows.len());
    style::print_hint("Run one with: causal-sim run --scenario <scenario>");
}

/// Runs a scenario and reports truth versus naive estimate.
pub fn run(
    source: &ConfigSource,
    kind: ScenarioKind,
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

    let report = ScenarioConfig::new(kind, config.generation.clone())
        .with_confounding_strength(config.bias.confounding_strength)
        .with_selection_strength(config.bias.selection_strength)
        .run();

    match config.output.format {
        OutputFormat::Json => {
            let value = json!({
                "scenario": report.kind,
                "trueEffect": report.true_effect,
                "naiveEstimate": report.naive_estimate,
                "bias": report.bias,
                "summary": report.summary,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &ScenarioReport) {
    style::print_title(report.kind.name());
    println!("{}", report.kind.description().muted());
    style::print_spacer();

    let summary = &report.summary;
    style::print_info_table(&[
        ("Units", summary.n.to_string()),
        ("Treated", summary.n_treated.to_string()),
        ("Untreated", summary.n_untreated.to_string()),
        ("Mean outcome (treated)", fmt_stat(summary.mean_treated_outcome)),
        (
            "Mean outcome (untreated)",
            fmt_stat(summary.mean_untreated_outcome),
        ),
        ("True effect", fmt_stat(report.true_effect)),
        ("Naive estimate", fmt_stat(report.naive_estimate)),
        ("Bias", fmt_stat(report.bias)),
    ]);

    if report.bias.abs() > BIAS_WARNING_THRESHOLD {
        style::print_warn(&format!(
            "The naive estimate is off by {} from the true effect",
            fmt_stat(report.bias.abs())
        ));
    } else {
        style::print_success("The naive estimate is close to the true effect");
    }
}
