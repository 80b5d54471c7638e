//! Fitted marketing mix model
//!
//! [`FittedModel`] is the immutable result of one successful fit: feature
//! schema, standardization, coefficients and the configuration that produced
//! them. [`MarketingMixModel`] wraps it behind the [`MixModel`] contract and
//! replaces it wholesale on every successful re-fit.

use crate::decomposition::decompose;
use crate::elastic_net::ElasticNet;
use crate::features::FeatureBuilder;
use crate::scaler::Standardization;
use crate::validation::rolling_origin_cv;
use mmm_api::{
    CrossValidationConfig, CrossValidationReport, Decomposer, Decomposition, FeatureRole,
    FeatureSet, FitFailure, MixModel, MmmError, ModelConfig, Observation, Result,
};
use mmm_spi::model::sales;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default magnitude below which coefficients are left out of a summary
pub const DEFAULT_COEFFICIENT_THRESHOLD: f64 = 0.01;

/// How the solver reached its coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    pub iterations: usize,
    pub n_observations: usize,
}

/// Immutable result of a successful fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    config: ModelConfig,
    feature_names: Vec<String>,
    roles: Vec<FeatureRole>,
    coefficients: Vec<f64>,
    intercept: f64,
    standardization: Standardization,
    diagnostics: FitDiagnostics,
}

impl FittedModel {
    /// Standardize the features, then solve the elastic net against `target`.
    ///
    /// `features` must have the schema [`FeatureBuilder`] produces for
    /// `config`, otherwise the fit fails with `SchemaMismatch`.
    pub fn fit(config: &ModelConfig, features: &FeatureSet, target: &[f64]) -> Result<Self> {
        config.validate()?;

        if features.is_empty() || target.is_empty() {
            return Err(FitFailure::EmptyInput.into());
        }
        if target.len() != features.n_rows() {
            return Err(FitFailure::LengthMismatch {
                features: features.n_rows(),
                target: target.len(),
            }
            .into());
        }
        FeatureBuilder::new(config).check_schema(features)?;

        let standardization = Standardization::fit(features)?;
        let standardized = standardization.transform(features)?;
        let solver = ElasticNet::from_config(&config.regularization);
        let solution = solver.fit(&standardized, target)?;

        tracing::info!(
            observations = target.len(),
            features = features.n_features(),
            alpha = solver.alpha(),
            l1_ratio = solver.l1_ratio(),
            iterations = solution.iterations,
            "fitted marketing mix model"
        );

        Ok(Self {
            config: config.clone(),
            feature_names: features.names(),
            roles: features.columns().iter().map(|c| c.role.clone()).collect(),
            coefficients: solution.coefficients,
            intercept: solution.intercept,
            standardization,
            diagnostics: FitDiagnostics {
                iterations: solution.iterations,
                n_observations: target.len(),
            },
        })
    }

    /// Predict from a feature set with exactly the fitted schema
    pub fn predict(&self, features: &FeatureSet) -> Result<Vec<f64>> {
        let standardized = self.standardization.transform(features)?;

        let mut predictions = vec![self.intercept; features.n_rows()];
        for (column, coefficient) in standardized.iter().zip(&self.coefficients) {
            for (prediction, z) in predictions.iter_mut().zip(column) {
                *prediction += z * coefficient;
            }
        }
        Ok(predictions)
    }

    /// Build features for a window with the fitted configuration
    pub fn features(&self, observations: &[Observation]) -> Result<FeatureSet> {
        FeatureBuilder::new(&self.config).build(observations)
    }

    /// Build features for a window and predict them
    pub fn predict_observations(&self, observations: &[Observation]) -> Result<Vec<f64>> {
        if observations.is_empty() {
            return Ok(Vec::new());
        }
        self.predict(&self.features(observations)?)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn roles(&self) -> &[FeatureRole] {
        &self.roles
    }

    pub fn standardization(&self) -> &Standardization {
        &self.standardization
    }

    pub fn diagnostics(&self) -> FitDiagnostics {
        self.diagnostics
    }

    /// Intercept in standardized space
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficients in standardized space, in feature order
    pub fn coefficients(&self) -> Vec<(&str, f64)> {
        self.feature_names
            .iter()
            .map(String::as_str)
            .zip(self.coefficients.iter().copied())
            .collect()
    }

    /// Coefficients per unit of the raw feature value
    pub fn unscaled_coefficients(&self) -> Vec<(&str, f64)> {
        self.feature_names
            .iter()
            .map(String::as_str)
            .zip(self.unscaled_values())
            .collect()
    }

    pub(crate) fn unscaled_values(&self) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(self.standardization.scales())
            .map(|(coefficient, scale)| coefficient / scale)
            .collect()
    }

    /// Prediction when every raw feature is zero
    pub fn baseline(&self) -> f64 {
        self.intercept
            - self
                .standardization
                .means()
                .iter()
                .zip(self.unscaled_values())
                .map(|(mean, coefficient)| mean * coefficient)
                .sum::<f64>()
    }

    /// Features whose standardized coefficient exceeds `threshold` in
    /// magnitude, largest first, plus the intercept
    pub fn coefficient_summary(&self, threshold: f64) -> CoefficientSummary {
        let mut entries: Vec<(String, f64)> = self
            .coefficients()
            .into_iter()
            .filter(|(_, c)| c.abs() > threshold)
            .map(|(name, c)| (name.to_string(), c))
            .collect();
        entries.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

        CoefficientSummary {
            entries,
            intercept: self.intercept,
        }
    }
}

/// Ranked view of the most influential coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSummary {
    pub entries: Vec<(String, f64)>,
    pub intercept: f64,
}

impl fmt::Display for CoefficientSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Coefficients:")?;
        for (name, coefficient) in &self.entries {
            writeln!(f, "  {:<28} {:>14.4}", name, coefficient)?;
        }
        write!(f, "  {:<28} {:>14.4}", "intercept", self.intercept)
    }
}

/// Marketing mix model over weekly observations
#[derive(Debug, Clone, Default)]
pub struct MarketingMixModel {
    config: ModelConfig,
    fitted: Option<FittedModel>,
}

impl MarketingMixModel {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Current fitted state
    pub fn fitted(&self) -> Result<&FittedModel> {
        self.fitted.as_ref().ok_or(MmmError::NotFitted)
    }

    /// Rolling-origin cross-validation with fresh models built from this
    /// model's configuration. Does not touch this model's fitted state.
    pub fn cross_validate(
        &self,
        observations: &[Observation],
        cv_config: &CrossValidationConfig,
    ) -> Result<CrossValidationReport> {
        let config = &self.config;
        rolling_origin_cv(observations, cv_config, || {
            Ok(MarketingMixModel::new(config.clone()))
        })
    }
}

impl MixModel for MarketingMixModel {
    fn fit(&mut self, observations: &[Observation]) -> Result<()> {
        if observations.is_empty() {
            return Err(FitFailure::EmptyInput.into());
        }

        let config = self.config.resolve_channels(observations)?;
        let features = FeatureBuilder::new(&config).build(observations)?;
        let fitted = FittedModel::fit(&config, &features, &sales(observations))?;

        self.fitted = Some(fitted);
        Ok(())
    }

    fn predict(&self, observations: &[Observation]) -> Result<Vec<f64>> {
        self.fitted()?.predict_observations(observations)
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

impl Decomposer for MarketingMixModel {
    fn decompose(&self, observations: &[Observation]) -> Result<Decomposition> {
        decompose(self.fitted()?, observations)
    }
}
