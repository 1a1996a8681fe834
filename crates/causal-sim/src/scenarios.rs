//! Preset scenarios for lessons.
//!
//! A scenario is a data-generating process: a randomized baseline, optionally
//! passed through the confounding and/or selection injectors. Running one
//! yields the dataset together with the truth and the naive estimate so the
//! caller can show how far apart they are.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bias::{add_confounding, add_selection_bias, clamp_strength};
use crate::data::Dataset;
use crate::estimate::{SummaryStats, calculate_naive_estimate, calculate_summary_stats};
use crate::generate::{GenerationConfig, generate_data};

/// Confounding strength used by presets unless overridden.
pub const DEFAULT_CONFOUNDING_STRENGTH: f64 = 0.8;

/// Selection strength used by presets unless overridden.
pub const DEFAULT_SELECTION_STRENGTH: f64 = 0.6;

// ============================================================================
// Scenario Types
// ============================================================================

/// Predefined data-generating processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    /// Fair-coin assignment, no bias
    Randomized,
    /// Latent confounder drives treatment and outcome
    Confounded,
    /// Outcome-dependent dropout
    SelectionBiased,
    /// Confounding followed by selection
    Combined,
}

impl ScenarioKind {
    /// Returns a human-readable name for the scenario.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Randomized => "Randomized Experiment",
            Self::Confounded => "Confounded Observational Study",
            Self::SelectionBiased => "Selection Bias (Attrition)",
            Self::Combined => "Confounding + Selection",
        }
    }

    /// Returns a description of what this scenario demonstrates.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Randomized => {
                "Treatment assigned by coin flip; the difference in means recovers the true effect"
            }
            Self::Confounded => {
                "A hidden variable raises both treatment probability and outcome, inflating the naive estimate"
            }
            Self::SelectionBiased => {
                "Untreated units with poor outcomes drop out, so the observed sample misleads"
            }
            Self::Combined => "Confounding and attrition together",
        }
    }

    /// Short identifier accepted by [`FromStr`].
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Randomized => "randomized",
            Self::Confounded => "confounded",
            Self::SelectionBiased => "selection-biased",
            Self::Combined => "combined",
        }
    }

    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            Self::Randomized,
            Self::Confounded,
            Self::SelectionBiased,
            Self::Combined,
        ]
    }

    fn uses_confounding(self) -> bool {
        matches!(self, Self::Confounded | Self::Combined)
    }

    fn uses_selection(self) -> bool {
        matches!(self, Self::SelectionBiased | Self::Combined)
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when parsing an unknown scenario name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scenario '{0}' (expected one of: randomized, confounded, selection-biased, combined)")]
pub struct UnknownScenario(pub String);

impl FromStr for ScenarioKind {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "randomized" | "random" | "rct" => Ok(Self::Randomized),
            "confounded" | "confounding" => Ok(Self::Confounded),
            "selection-biased" | "selection" => Ok(Self::SelectionBiased),
            "combined" => Ok(Self::Combined),
            _ => Err(UnknownScenario(s.to_string())),
        }
    }
}

// ============================================================================
// Scenario Configuration
// ============================================================================

/// Configuration for one scenario run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub kind: ScenarioKind,
    pub generation: GenerationConfig,
    /// Applied only by kinds that confound.
    pub confounding_strength: f64,
    /// Applied only by kinds that select.
    pub selection_strength: f64,
}

impl ScenarioConfig {
    /// Creates a scenario with the default injector strengths.
    pub fn new(kind: ScenarioKind, generation: GenerationConfig) -> Self {
        Self {
            kind,
            generation,
            confounding_strength: DEFAULT_CONFOUNDING_STRENGTH,
            selection_strength: DEFAULT_SELECTION_STRENGTH,
        }
    }

    pub fn with_confounding_strength(mut self, strength: f64) -> Self {
        self.confounding_strength = clamp_strength(strength);
        self
    }

    pub fn with_selection_strength(mut self, strength: f64) -> Self {
        self.selection_strength = clamp_strength(strength);
        self
    }

    /// Builds the scenario's dataset.
    pub fn build_dataset(&self) -> Dataset {
        let mut dataset = generate_data(&self.generation);
        if self.kind.uses_confounding() {
            dataset = add_confounding(&dataset, self.confounding_strength);
        }
        if self.kind.uses_selection() {
            dataset = add_selection_bias(&dataset, self.selection_strength);
        }
        dataset
    }

    /// Builds the dataset and estimates on it.
    pub fn run(&self) -> ScenarioReport {
        let dataset = self.build_dataset();
        let naive_estimate = calculate_naive_estimate(&dataset);
        let summary = calculate_summary_stats(&dataset);
        let true_effect = dataset.treatment_effect();

        debug!(
            scenario = %self.kind,
            n = summary.n,
            true_effect,
            naive_estimate,
            "scenario complete"
        );

        ScenarioReport {
            kind: self.kind,
            true_effect,
            naive_estimate,
            bias: naive_estimate - true_effect,
            summary,
            dataset,
        }
    }
}

/// Result of [`ScenarioConfig::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub kind: ScenarioKind,
    pub true_effect: f64,
    pub naive_estimate: f64,
    /// `naive_estimate - true_effect`
    pub bias: f64,
    pub summary: SummaryStats,
    pub dataset: Dataset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_kinds_round_trip_through_slug() {
        for kind in ScenarioKind::all() {
            assert_eq!(kind.slug().parse::<ScenarioKind>().unwrap(), *kind);
            assert!(!kind.name().is_empty());
            assert!(!kind.description().is_empty());
        }
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        let err = "instrumental".parse::<ScenarioKind>().unwrap_err();
        assert!(err.to_string().contains("instrumental"));
    }

    #[test]
    fn strengths_are_clamped_on_override() {
        let config = ScenarioConfig::new(ScenarioKind::Combined, GenerationConfig::default())
            .with_confounding_strength(2.0)
            .with_selection_strength(-1.0);

        assert_eq!(config.confounding_strength, 1.0);
        assert_eq!(config.selection_strength, 0.0);
    }

    #[test]
    fn randomized_scenario_keeps_every_unit() {
        let generation = GenerationConfig::new(400, 5.0).with_seed(8);
        let report = ScenarioConfig::new(ScenarioKind::Randomized, generation).run();

        assert_eq!(report.summary.n, 400);
        assert!(report.dataset.iter().all(|p| p.confounder.is_none()));
        assert_eq!(report.bias, report.naive_estimate - 5.0);
    }

    #[test]
    fn confounded_scenario_attaches_propensity() {
        let generation = GenerationConfig::new(100, 5.0).with_seed(8);
        let report = ScenarioConfig::new(ScenarioKind::Confounded, generation).run();

        assert_eq!(report.summary.n, 100);
        assert!(report.dataset.iter().all(|p| p.propensity_score.is_some()));
    }

    #[test]
    fn selection_scenario_never_grows() {
        let generation = GenerationConfig::new(500, 5.0).with_seed(8);
        let report = ScenarioConfig::new(ScenarioKind::SelectionBiased, generation).run();

        assert!(report.summary.n <= 500);
    }
}
