//! Sales decomposition
//!
//! Standardization is inverted analytically: for a feature with mean `m`,
//! scale `s` and standardized coefficient `c`, the raw-unit coefficient is
//! `c / s` and the constant `m * c / s` moves into the base. Each feature's
//! contribution is then `x * c / s`, and base plus all contributions equals
//! the direct prediction.

use crate::model::FittedModel;
use mmm_api::{Decomposition, FeatureRole, MmmError, Observation, Result};

/// Largest relative disagreement tolerated between a decomposition and the
/// model's direct prediction
pub const RECONCILIATION_TOLERANCE: f64 = 1e-6;

/// Split the model's predictions for a window into base, per-channel,
/// seasonal and per-control contributions.
pub fn decompose(fitted: &FittedModel, observations: &[Observation]) -> Result<Decomposition> {
    let n = observations.len();
    let weeks = observations.iter().map(|o| o.week).collect();

    let mut channels: Vec<(String, Vec<f64>)> = fitted
        .config()
        .channels
        .iter()
        .map(|c| (c.name.clone(), vec![0.0; n]))
        .collect();
    let mut controls: Vec<(String, Vec<f64>)> = fitted
        .roles()
        .iter()
        .filter_map(|role| match role {
            FeatureRole::Control { flag } => Some((flag.clone(), vec![0.0; n])),
            _ => None,
        })
        .collect();
    let mut seasonality = vec![0.0; n];

    if n == 0 {
        return Decomposition::new(weeks, Vec::new(), channels, seasonality, controls);
    }

    let features = fitted.features(observations)?;
    if features.names() != fitted.feature_names() {
        return Err(MmmError::SchemaMismatch {
            expected: fitted.feature_names().to_vec(),
            actual: features.names(),
        });
    }

    for (column, coefficient) in features.columns().iter().zip(fitted.unscaled_values()) {
        let target = match &column.role {
            FeatureRole::Channel { channel } => series_mut(&mut channels, channel)?,
            FeatureRole::Seasonal { .. } => &mut seasonality,
            FeatureRole::Control { flag } => series_mut(&mut controls, flag)?,
        };
        for (total, x) in target.iter_mut().zip(&column.values) {
            *total += x * coefficient;
        }
    }

    let decomposition = Decomposition::new(
        weeks,
        vec![fitted.baseline(); n],
        channels,
        seasonality,
        controls,
    )?;

    if cfg!(debug_assertions) {
        let direct = fitted.predict(&features)?;
        let error = decomposition.max_relative_error(&direct);
        debug_assert!(
            error <= RECONCILIATION_TOLERANCE,
            "decomposition disagrees with prediction by {}",
            error
        );
    }

    Ok(decomposition)
}

fn series_mut<'a>(series: &'a mut [(String, Vec<f64>)], name: &str) -> Result<&'a mut Vec<f64>> {
    series
        .iter_mut()
        .find(|(n, _)| n == name)
        .map(|(_, values)| values)
        .ok_or_else(|| MmmError::InvalidData(format!("no component named '{}'", name)))
}
