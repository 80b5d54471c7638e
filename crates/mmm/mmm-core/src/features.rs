//! Design matrix construction
//!
//! Turns a window of observations into a [`FeatureSet`] with a fixed column
//! order: transformed spend per channel, then Fourier seasonal terms, then
//! binary control flags. Every column records the role it plays so later
//! stages never need to interpret feature names.

use crate::transform::transform_spend;
use mmm_api::{FeatureRole, FeatureSet, MmmError, ModelConfig, Observation, Result};
use std::f64::consts::PI;

/// Builds feature sets from an explicit model configuration
#[derive(Debug, Clone, Copy)]
pub struct FeatureBuilder<'a> {
    config: &'a ModelConfig,
}

impl<'a> FeatureBuilder<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        self.config
    }

    /// Check the window is usable.
    ///
    /// Week indices must increase by exactly one from the first observation,
    /// and sales must be finite and non-negative.
    pub fn validate_observations(&self, observations: &[Observation]) -> Result<()> {
        let Some(first) = observations.first() else {
            return Ok(());
        };

        for (offset, observation) in observations.iter().enumerate() {
            if observation.week != first.week + offset {
                return Err(MmmError::InvalidData(format!(
                    "week {} found where week {} was expected; weeks must be contiguous",
                    observation.week,
                    first.week + offset
                )));
            }
            if !(observation.sales.is_finite() && observation.sales >= 0.0) {
                return Err(MmmError::InvalidData(format!(
                    "week {} has invalid sales {}",
                    observation.week, observation.sales
                )));
            }
        }
        Ok(())
    }

    /// Build the design matrix for a window
    pub fn build(&self, observations: &[Observation]) -> Result<FeatureSet> {
        self.validate_observations(observations)?;

        let mut features = FeatureSet::with_rows(observations.len());
        self.push_channels(&mut features, observations)?;
        self.push_seasonality(&mut features, observations)?;
        self.push_controls(&mut features, observations)?;

        tracing::debug!(
            rows = features.n_rows(),
            features = features.n_features(),
            "built feature matrix"
        );
        Ok(features)
    }

    /// Check a feature set has the columns this configuration builds.
    ///
    /// Channel and seasonal columns must match exactly. Control columns may be
    /// any of the configured flags in configured order, since a flag no
    /// observation carries is omitted.
    pub fn check_schema(&self, features: &FeatureSet) -> Result<()> {
        let mut expected: Vec<(String, FeatureRole)> = self
            .config
            .channels
            .iter()
            .map(|c| {
                let role = FeatureRole::Channel {
                    channel: c.name.clone(),
                };
                (c.feature_name(), role)
            })
            .collect();
        for k in 1..=self.config.fourier_terms {
            expected.push((format!("sin_{}", k), FeatureRole::Seasonal { harmonic: k }));
            expected.push((format!("cos_{}", k), FeatureRole::Seasonal { harmonic: k }));
        }

        let columns = features.columns();
        let fixed_match = columns.len() >= expected.len()
            && columns
                .iter()
                .zip(&expected)
                .all(|(column, (name, role))| column.name == *name && column.role == *role);

        let is_control = |role: &FeatureRole| matches!(role, FeatureRole::Control { .. });
        let mut flags = self.config.controls.iter();
        let controls_match = expected.len() + features.columns_where(is_control).count()
            == columns.len()
            && features.columns_where(is_control).all(|column| match &column.role {
                FeatureRole::Control { flag } => column.name == *flag && flags.any(|f| f == flag),
                _ => false,
            });

        if fixed_match && controls_match {
            return Ok(());
        }
        Err(MmmError::SchemaMismatch {
            expected: expected
                .into_iter()
                .map(|(name, _)| name)
                .chain(self.config.controls.iter().cloned())
                .collect(),
            actual: features.names(),
        })
    }

    fn push_channels(&self, features: &mut FeatureSet, observations: &[Observation]) -> Result<()> {
        for channel in &self.config.channels {
            let spend = observations
                .iter()
                .map(|o| match o.spend_for(&channel.name) {
                    Some(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
                    Some(amount) => Err(MmmError::InvalidData(format!(
                        "week {} has invalid spend {} for channel '{}'",
                        o.week, amount, channel.name
                    ))),
                    None => Err(MmmError::InvalidData(format!(
                        "week {} has no spend for channel '{}'",
                        o.week, channel.name
                    ))),
                })
                .collect::<Result<Vec<f64>>>()?;

            let method = channel.saturation_or(self.config.saturation);
            let values = transform_spend(&spend, channel.decay, method)?;
            features.push(
                channel.feature_name(),
                FeatureRole::Channel {
                    channel: channel.name.clone(),
                },
                values,
            )?;
        }
        Ok(())
    }

    fn push_seasonality(
        &self,
        features: &mut FeatureSet,
        observations: &[Observation],
    ) -> Result<()> {
        let period = self.config.seasonal_period;
        for k in 1..=self.config.fourier_terms {
            let angle = |o: &Observation| 2.0 * PI * k as f64 * o.week as f64 / period;
            let sin = observations.iter().map(|o| angle(o).sin()).collect();
            let cos = observations.iter().map(|o| angle(o).cos()).collect();

            features.push(format!("sin_{}", k), FeatureRole::Seasonal { harmonic: k }, sin)?;
            features.push(format!("cos_{}", k), FeatureRole::Seasonal { harmonic: k }, cos)?;
        }
        Ok(())
    }

    fn push_controls(&self, features: &mut FeatureSet, observations: &[Observation]) -> Result<()> {
        for flag in &self.config.controls {
            let values: Vec<Option<bool>> = observations
                .iter()
                .map(|o| o.events.get(flag).copied())
                .collect();

            let carried = values.iter().filter(|v| v.is_some()).count();
            if carried == 0 {
                continue;
            }
            if carried < values.len() {
                return Err(MmmError::InvalidData(format!(
                    "control '{}' is present in {} of {} observations",
                    flag,
                    carried,
                    values.len()
                )));
            }

            let column = values
                .into_iter()
                .map(|v| if v == Some(true) { 1.0 } else { 0.0 })
                .collect();
            features.push(
                flag.clone(),
                FeatureRole::Control { flag: flag.clone() },
                column,
            )?;
        }
        Ok(())
    }
}
