//! Configuration management commands.

use anyhow::Result;

use super::ConfigSource;

/// Show the effective configuration.
pub fn show(source: &ConfigSource, format: &str) -> Result<()> {
    let config = source.load()?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        "toml" => {
            let toml_str = toml::to_string_pretty(&config)?;
            println!("{toml_str}");
        }
        "text" => {
            println!("causal-sim Configuration");
            println!("========================\n");

            let generation = &config.generation;
            println!("Generation:");
            println!("  Units: {}", generation.n);
            println!("  Treatment effect: {}", generation.treatment_effect);
            println!("  Base outcome: {}", generation.base_outcome);
            println!("  Noise: {}", generation.noise);
            println!(
                "  Seed: {}",
                generation
                    .seed
                    .map_or("None (entropy)".to_string(), |s| s.to_string())
            );
            println!();

            println!("Bias:");
            println!("  Confounding strength: {}", config.bias.confounding_strength);
            println!("  Selection strength: {}", config.bias.selection_strength);
            println!();

            println!("Sweep:");
            println!("  Kind: {:?}", config.sweep.kind);
            println!("  Strengths: {:?}", config.sweep.strengths);
            println!("  Seeds: {} (from {})", config.sweep.seeds, config.sweep.first_seed);
            println!();

            println!("Output:");
            println!("  Format: {:?}", config.output.format);
            println!("  Row limit: {}", config.output.limit);
        }
        other => anyhow::bail!("unknown format '{other}' (expected text, json or toml)"),
    }

    Ok(())
}
