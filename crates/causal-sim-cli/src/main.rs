//! causal-sim command-line interface.
//!
//! Generate synthetic experiments, bias them, and compare naive estimates
//! with the true treatment effect.
//!
//! # Quick Start
//!
//! ```bash
//! # A randomized experiment with 1000 units and a true effect of 5
//! causal-sim generate --units 1000 --effect 5 --seed 42
//!
//! # Same data through a confounder
//! causal-sim run --scenario confounded --seed 42
//!
//! # How bias grows with confounding strength
//! causal-sim sweep --kind confounding --seeds 20
//! ```

mod commands;
mod style;

use std::path::PathBuf;

use anyhow::Result;
use causal_sim::{ScenarioKind, SweepKind};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GenerationArgs, OutputArgs};

/// causal-sim - synthetic data for causal inference lessons.
#[derive(Parser)]
#[command(name = "causal-sim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory searched for causal-sim.toml and causal-sim.local.toml.
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Read this TOML file instead of the layered configuration.
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Log engine activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// List preset scenarios.
    Scenarios,

    /// Generate a dataset, optionally biased.
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Inject confounding with this strength (0-1).
        #[arg(long)]
        confounding: Option<f64>,

        /// Inject selection bias with this strength (0-1).
        #[arg(long)]
        selection: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run a preset scenario and compare the naive estimate with the truth.
    Run {
        /// Scenario (randomized, confounded, selection-biased, combined).
        #[arg(long, default_value = "confounded")]
        scenario: ScenarioKind,

        #[command(flatten)]
        generation: GenerationArgs,

        /// Override the configured confounding strength (0-1).
        #[arg(long)]
        confounding: Option<f64>,

        /// Override the configured selection strength (0-1).
        #[arg(long)]
        selection: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Average the naive estimate over seeds at increasing bias strengths.
    Sweep {
        /// Injector to vary (confounding, selection).
        #[arg(short, long)]
        kind: Option<SweepKind>,

        /// Comma-separated strengths, e.g. 0,0.5,1.
        #[arg(long, value_delimiter = ',')]
        strengths: Option<Vec<f64>>,

        /// Number of seeds per strength.
        #[arg(long)]
        seeds: Option<u32>,

        /// First seed of the run.
        #[arg(long, allow_hyphen_values = true)]
        first_seed: Option<i64>,

        #[command(flatten)]
        generation: GenerationArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Configuration commands.
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration.
    Show {
        /// Output format (text, json, toml).
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    style::set_no_color(cli.no_color);

    if let Err(e) = run(cli) {
        style::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "causal_sim=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let source = commands::ConfigSource {
        project_dir: cli.project_dir,
        file: cli.config_file,
    };

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
        Commands::Scenarios => {
            commands::scenarios::list();
            Ok(())
        }
        Commands::Generate {
            generation,
            confounding,
            selection,
            output,
        } => commands::generate::run(&source, &generation, confounding, selection, &output),
        Commands::Run {
            scenario,
            generation,
            confounding,
            selection,
            output,
        } => commands::scenarios::run(
            &source,
            scenario,
            &generation,
            confounding,
            selection,
            &output,
        ),
        Commands::Sweep {
            kind,
            strengths,
            seeds,
            first_seed,
            generation,
            output,
        } => commands::sweep::run(
            &source,
            commands::sweep::SweepOverrides {
                kind,
                strengths,
                seeds,
                first_seed,
            },
            &generation,
            &output,
        ),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show { format } => commands::config::show(&source, &format),
        },
    }
}
