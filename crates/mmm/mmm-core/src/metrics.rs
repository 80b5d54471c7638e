//! Forecast accuracy metrics
//!
//! All metrics return NaN for empty input or mismatched lengths.

use serde::{Deserialize, Serialize};

/// Mean Absolute Error (MAE)
///
/// Average of absolute differences between predictions and actual values.
/// Same scale as sales.
///
/// # Example
///
/// ```rust
/// use mmm_core::metrics::mae;
///
/// let error = mae(&[100.0, 200.0], &[90.0, 210.0]);
/// assert_eq!(error, 10.0);
/// ```
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();

    sum / actual.len() as f64
}

/// Root Mean Squared Error (RMSE)
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    (sum / actual.len() as f64).sqrt()
}

/// Mean Absolute Percentage Error (MAPE)
///
/// Returned as a fraction, not a percentage. Periods with zero actual sales
/// are skipped and the mean is taken over the remaining periods; NaN when
/// every actual is zero.
pub fn mape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let (sum, count) = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, _)| **a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (a, p)| {
            (sum + ((a - p) / a).abs(), count + 1)
        });

    if count == 0 {
        return f64::NAN;
    }
    sum / count as f64
}

/// R-squared (Coefficient of Determination)
///
/// 1.0 = perfect, 0.0 = same as predicting the mean, negative = worse.
/// For a constant actual series the ratio is undefined: a perfect
/// prediction scores 1.0, anything else 0.0.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;

    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

/// Compute all metrics at once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub mae: f64,
    pub rmse: f64,
    pub mape: f64,
    pub r_squared: f64,
}

impl MetricsSummary {
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Self {
        Self {
            mae: mae(actual, predicted),
            rmse: rmse(actual, predicted),
            mape: mape(actual, predicted),
            r_squared: r_squared(actual, predicted),
        }
    }
}
