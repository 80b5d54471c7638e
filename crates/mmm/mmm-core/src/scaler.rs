//! Feature standardization
//!
//! Statistics are computed once from the training feature set and reused
//! unchanged for every later transform, so prediction windows are scaled
//! exactly like the data the model was fitted on.

use mmm_api::{FeatureSet, FitFailure, MmmError, Result};
use serde::{Deserialize, Serialize};

/// Per-feature mean and scale learned from a training feature set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardization {
    names: Vec<String>,
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl Standardization {
    /// Learn means and population standard deviations.
    ///
    /// A feature without variance gets a scale of 1.0 and is only centered.
    pub fn fit(features: &FeatureSet) -> Result<Self> {
        if features.is_empty() {
            return Err(FitFailure::EmptyInput.into());
        }

        let n = features.n_rows() as f64;
        let mut means = Vec::with_capacity(features.n_features());
        let mut scales = Vec::with_capacity(features.n_features());

        for column in features.columns() {
            let mean = column.values.iter().sum::<f64>() / n;
            let variance = column
                .values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / n;
            let std = variance.sqrt();

            let scale = if std <= 1e-12 * mean.abs().max(1.0) {
                tracing::warn!(feature = %column.name, "feature has zero variance, leaving it unscaled");
                1.0
            } else {
                std
            };

            means.push(mean);
            scales.push(scale);
        }

        Ok(Self {
            names: features.names(),
            means,
            scales,
        })
    }

    /// Standardize a feature set with the stored statistics.
    ///
    /// Returns column-major data in the fitted feature order.
    pub fn transform(&self, features: &FeatureSet) -> Result<Vec<Vec<f64>>> {
        let actual = features.names();
        if actual != self.names {
            return Err(MmmError::SchemaMismatch {
                expected: self.names.clone(),
                actual,
            });
        }

        Ok(features
            .columns()
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(column, (mean, scale))| {
                column.values.iter().map(|v| (v - mean) / scale).collect()
            })
            .collect())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn scales(&self) -> &[f64] {
        &self.scales
    }
}
