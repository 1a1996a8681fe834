//! Bias injectors: confounding and selection.
//!
//! Both injectors are pure. They read an input dataset and return a new one;
//! the input is never touched. Randomness comes from per-unit [`LcgRng`]
//! streams keyed by the point id (see [`unit_seed`]), so the same input and
//! strength always produce the same output.
//!
//! Strengths are clamped into `[0, 1]`. Non-finite strengths are treated as 0.

use tracing::debug;

use crate::data::{DataPoint, Dataset};
use crate::rng::{LcgRng, unit_seed};

/// Salt for the per-unit confounding streams.
pub const CONFOUNDING_SALT: u64 = 42;

/// Salt for the per-unit selection streams.
pub const SELECTION_SALT: u64 = 7919;

pub const MIN_PROPENSITY: f64 = 0.05;
pub const MAX_PROPENSITY: f64 = 0.95;

pub const MIN_RETENTION: f64 = 0.1;
pub const MAX_RETENTION: f64 = 1.0;

/// Center of the uniform `[0, 100)` confounder.
const CONFOUNDER_CENTER: f64 = 50.0;

/// Outcome shift per unit of centered confounder, at full strength.
const CONFOUNDER_OUTCOME_SLOPE: f64 = 0.3;

/// Outcome scale used to standardize outcomes for retention.
const SELECTION_SCALE: f64 = 20.0;

/// Clamps an injector strength into `[0, 1]`.
#[inline]
pub fn clamp_strength(strength: f64) -> f64 {
    if strength.is_finite() {
        strength.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Propensity score for a confounder value at the given (clamped) strength.
#[inline]
pub fn propensity_score(confounder: f64, strength: f64) -> f64 {
    (0.5 + strength * (confounder - CONFOUNDER_CENTER) / 100.0)
        .clamp(MIN_PROPENSITY, MAX_PROPENSITY)
}

// ============================================================================
// Confounding
// ============================================================================

/// Injects a latent confounder that drives both treatment and outcome.
///
/// Per unit:
/// 1. `confounder` is drawn uniform on `[0, 100)`.
/// 2. `propensity_score = clamp(0.5 + strength * (confounder - 50) / 100, 0.05, 0.95)`.
/// 3. Treatment is redrawn as Bernoulli(propensity). The draw is coupled to
///    the original assignment: a treated unit sits in the lower half of
///    `[0, 1)`, an untreated one in the upper half, and the unit is treated
///    iff that position falls below its propensity. When the input treatment
///    is a fair coin independent of the confounder, as from
///    [`generate_data`](crate::generate_data), this is marginally
///    Bernoulli(propensity). For other inputs `propensity_score` is not the
///    unit's actual treatment probability. At strength 0 the original
///    assignment is reproduced exactly.
/// 4. The outcome follows the new treatment (`± treatment_effect` when the
///    assignment flips) and gains `strength * (confounder - 50) * 0.3`.
///
/// Higher confounders raise both treatment probability and outcome, which is
/// the spurious correlation the naive estimate picks up.
pub fn add_confounding(data: &Dataset, strength: f64) -> Dataset {
    let strength = clamp_strength(strength);
    let effect = data.treatment_effect();

    let points: Vec<DataPoint> = data
        .iter()
        .map(|point| confound_point(point, strength, effect))
        .collect();

    let treated = points.iter().filter(|p| p.treatment).count();
    debug!(
        n = points.len(),
        strength,
        treated,
        "injected confounding"
    );

    Dataset::new(points, effect)
}

fn confound_point(point: &DataPoint, strength: f64, effect: f64) -> DataPoint {
    let mut rng = LcgRng::from_unsigned(unit_seed(point.id, CONFOUNDING_SALT));

    let confounder = rng.next_f64() * 100.0;
    let propensity = propensity_score(confounder, strength);

    let half = if point.treatment { 0.0 } else { 0.5 };
    let position = 0.5 * rng.next_f64() + half;
    let treatment = position < propensity;

    let reassignment = match (point.treatment, treatment) {
        (false, true) => effect,
        (true, false) => -effect,
        _ => 0.0,
    };
    let outcome = point.outcome
        + reassignment
        + strength * (confounder - CONFOUNDER_CENTER) * CONFOUNDER_OUTCOME_SLOPE;

    DataPoint {
        id: point.id,
        treatment,
        outcome,
        confounder: Some(confounder),
        propensity_score: Some(propensity),
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Subsamples the dataset with outcome- and treatment-dependent retention.
///
/// At strength 0 the result equals the input. Otherwise, with
/// `z = (outcome - mean) / 20` over the input population and base retention
/// `b = 1 - 0.5 * strength`:
///
/// | unit | retention |
/// |---|---|
/// | treated, `z > 0` | `b + 0.5 * strength * min(z, 1)` |
/// | untreated, `z < 0` | `b + 0.5 * strength * max(z, -1)` |
/// | otherwise | `b` |
///
/// clamped to `[0.1, 1.0]`. Poor outcomes among the untreated are the most
/// likely to drop out, as in attrition. Survivors keep their ids and order.
pub fn add_selection_bias(data: &Dataset, strength: f64) -> Dataset {
    let strength = clamp_strength(strength);
    if strength == 0.0 {
        return data.clone();
    }

    let mean = population_mean(data);
    let points: Vec<DataPoint> = data
        .iter()
        .filter(|point| {
            let retention = retention_probability(point, mean, strength);
            let mut rng = LcgRng::from_unsigned(unit_seed(point.id, SELECTION_SALT));
            rng.next_f64() < retention
        })
        .cloned()
        .collect();

    debug!(
        n_in = data.len(),
        n_out = points.len(),
        strength,
        "injected selection bias"
    );

    Dataset::new(points, data.treatment_effect())
}

/// Retention probability of one unit given the population mean outcome.
pub fn retention_probability(point: &DataPoint, mean: f64, strength: f64) -> f64 {
    let z = (point.outcome - mean) / SELECTION_SCALE;
    let base = 1.0 - strength * 0.5;

    let retention = if point.treatment && z > 0.0 {
        base + strength * z.min(1.0) * 0.5
    } else if !point.treatment && z < 0.0 {
        base + strength * z.max(-1.0) * 0.5
    } else {
        base
    };

    retention.clamp(MIN_RETENTION, MAX_RETENTION)
}

fn population_mean(points: &[DataPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.outcome).sum::<f64>() / points.len() as f64
}
