//! Data points and datasets.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// One synthetic unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    /// Index within the generation batch. Never renumbered.
    pub id: u64,
    pub treatment: bool,
    pub outcome: f64,
    /// Latent covariate, present only after confounding injection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confounder: Option<f64>,
    /// Probability of treatment, present only after confounding injection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propensity_score: Option<f64>,
}

impl DataPoint {
    /// Creates a point with no confounding fields.
    pub fn new(id: u64, treatment: bool, outcome: f64) -> Self {
        Self {
            id,
            treatment,
            outcome,
            confounder: None,
            propensity_score: None,
        }
    }

    /// Treatment as a `{0, 1}` indicator.
    #[inline]
    pub fn treatment_indicator(&self) -> u8 {
        u8::from(self.treatment)
    }
}

/// An ordered batch of data points.
///
/// Besides the points, a dataset records the additive treatment effect that
/// was baked into its outcomes at generation time. Injectors carry it forward
/// unchanged, which is what lets a caller compare a naive estimate against the
/// truth after the data has been biased. Datasets assembled by hand default
/// to an effect of zero.
///
/// Dereferences to `[DataPoint]`, so estimators accept `&dataset` directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    points: Vec<DataPoint>,
    treatment_effect: f64,
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>, treatment_effect: f64) -> Self {
        Self {
            points,
            treatment_effect,
        }
    }

    /// Wraps points whose true effect is unknown (recorded as zero).
    pub fn from_points(points: Vec<DataPoint>) -> Self {
        Self::new(points, 0.0)
    }

    /// The true additive effect of treatment on outcome.
    pub fn treatment_effect(&self) -> f64 {
        self.treatment_effect
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Ids in order, for subset and order checks.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.points.iter().map(|p| p.id)
    }
}

impl Deref for Dataset {
    type Target = [DataPoint];

    fn deref(&self) -> &[DataPoint] {
        &self.points
    }
}

impl AsRef<[DataPoint]> for Dataset {
    fn as_ref(&self) -> &[DataPoint] {
        &self.points
    }
}

impl IntoIterator for Dataset {
    type Item = DataPoint;
    type IntoIter = std::vec::IntoIter<DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
