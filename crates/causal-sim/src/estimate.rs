//! Difference-in-means estimators and descriptive statistics.
//!
//! None of these functions fail. Empty groups and empty inputs produce zeros,
//! so a lesson page asking for zero samples renders a flat result.

use serde::{Deserialize, Serialize};

use crate::data::{DataPoint, Dataset};

/// Mean outcome of treated units minus mean outcome of untreated units.
///
/// Returns 0 when either group is empty.
pub fn calculate_ate(data: &[DataPoint]) -> f64 {
    let treated = GroupAccumulator::collect(data.iter().filter(|p| p.treatment));
    let untreated = GroupAccumulator::collect(data.iter().filter(|p| !p.treatment));

    if treated.count == 0 || untreated.count == 0 {
        return 0.0;
    }
    treated.mean() - untreated.mean()
}

/// The naive estimate: [`calculate_ate`] applied to possibly-biased data.
///
/// Same formula, different label. It is "naive" because it makes no
/// adjustment for confounding or selection.
#[inline]
pub fn calculate_naive_estimate(data: &[DataPoint]) -> f64 {
    calculate_ate(data)
}

/// Naive estimate minus the dataset's recorded true effect.
pub fn estimation_bias(data: &Dataset) -> f64 {
    calculate_naive_estimate(data) - data.treatment_effect()
}

/// Descriptive aggregates over a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub n: usize,
    pub n_treated: usize,
    pub n_untreated: usize,
    pub mean_outcome: f64,
    pub mean_treated_outcome: f64,
    pub mean_untreated_outcome: f64,
    /// Fraction of units treated; 0 for an empty dataset.
    pub treatment_proportion: f64,
}

/// Computes [`SummaryStats`]. Means of empty groups are 0.
pub fn calculate_summary_stats(data: &[DataPoint]) -> SummaryStats {
    let all = GroupAccumulator::collect(data.iter());
    let treated = GroupAccumulator::collect(data.iter().filter(|p| p.treatment));
    let untreated = GroupAccumulator::collect(data.iter().filter(|p| !p.treatment));

    let treatment_proportion = if all.count == 0 {
        0.0
    } else {
        treated.count as f64 / all.count as f64
    };

    SummaryStats {
        n: all.count,
        n_treated: treated.count,
        n_untreated: untreated.count,
        mean_outcome: all.mean(),
        mean_treated_outcome: treated.mean(),
        mean_untreated_outcome: untreated.mean(),
        treatment_proportion,
    }
}

#[derive(Default)]
struct GroupAccumulator {
    count: usize,
    sum: f64,
}

impl GroupAccumulator {
    fn collect<'a>(points: impl Iterator<Item = &'a DataPoint>) -> Self {
        points.fold(Self::default(), |mut acc, point| {
            acc.count += 1;
            acc.sum += point.outcome;
            acc
        })
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: u64, treatment: bool, outcome: f64) -> DataPoint {
        DataPoint::new(id, treatment, outcome)
    }

    #[test]
    fn ate_is_difference_in_means() {
        let data = vec![
            point(0, true, 10.0),
            point(1, true, 14.0),
            point(2, false, 5.0),
            point(3, false, 7.0),
        ];

        assert_eq!(calculate_ate(&data), 6.0);
        assert_eq!(calculate_naive_estimate(&data), 6.0);
    }

    #[test]
    fn ate_of_empty_is_zero() {
        assert_eq!(calculate_ate(&[]), 0.0);
    }

    #[test]
    fn ate_with_single_group_is_zero() {
        let treated_only = vec![point(0, true, 10.0), point(1, true, 20.0)];
        let control_only = vec![point(0, false, 10.0)];

        assert_eq!(calculate_ate(&treated_only), 0.0);
        assert_eq!(calculate_ate(&control_only), 0.0);
    }

    #[test]
    fn summary_stats_aggregate() {
        let data = vec![
            point(0, true, 10.0),
            point(1, false, 4.0),
            point(2, false, 6.0),
            point(3, false, 8.0),
        ];

        let stats = calculate_summary_stats(&data);

        assert_eq!(stats.n, 4);
        assert_eq!(stats.n_treated, 1);
        assert_eq!(stats.n_untreated, 3);
        assert_eq!(stats.mean_outcome, 7.0);
        assert_eq!(stats.mean_treated_outcome, 10.0);
        assert_eq!(stats.mean_untreated_outcome, 6.0);
        assert_eq!(stats.treatment_proportion, 0.25);
    }

    #[test]
    fn summary_stats_of_empty_are_zero() {
        assert_eq!(calculate_summary_stats(&[]), SummaryStats::default());
    }

    #[test]
    fn summary_stats_with_no_treated() {
        let stats = calculate_summary_stats(&[point(0, false, 3.0)]);

        assert_eq!(stats.n_treated, 0);
        assert_eq!(stats.mean_treated_outcome, 0.0);
        assert_eq!(stats.mean_untreated_outcome, 3.0);
        assert_eq!(stats.treatment_proportion, 0.0);
    }

    #[test]
    fn estimation_bias_uses_recorded_effect() {
        let data = Dataset::new(vec![point(0, true, 9.0), point(1, false, 2.0)], 5.0);

        assert_eq!(estimation_bias(&data), 2.0);
    }
}
