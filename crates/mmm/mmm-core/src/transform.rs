//! Spend transforms
//!
//! Raw spend is turned into a regression feature in two steps: geometric
//! adstock models carryover from earlier periods, then a concave saturation
//! curve models diminishing returns.

use mmm_api::{MmmError, Result, SaturationMethod};

/// Geometric adstock
///
/// `y[0] = x[0]`, `y[t] = x[t] + decay * y[t-1]`.
///
/// A decay of 0 leaves the series unchanged, a decay of 1 turns it into a
/// running cumulative sum.
///
/// # Example
///
/// ```rust
/// use mmm_core::transform::adstock;
///
/// let carried = adstock(&[100.0, 0.0, 0.0, 0.0], 0.5).unwrap();
/// assert_eq!(carried, vec![100.0, 50.0, 25.0, 12.5]);
/// ```
pub fn adstock(x: &[f64], decay: f64) -> Result<Vec<f64>> {
    if !(0.0..=1.0).contains(&decay) {
        return Err(MmmError::invalid_parameter(
            "decay",
            format!("decay rate {} must be between 0 and 1", decay),
        ));
    }

    let mut carried = 0.0;
    Ok(x
        .iter()
        .map(|&value| {
            carried = value + decay * carried;
            carried
        })
        .collect())
}

/// Apply a saturation curve elementwise
///
/// Negative inputs are clamped to zero first, so zero always maps to zero
/// and the output is never negative.
pub fn saturate(x: &[f64], method: SaturationMethod) -> Vec<f64> {
    x.iter().map(|&value| saturate_value(value, method)).collect()
}

fn saturate_value(value: f64, method: SaturationMethod) -> f64 {
    let value = value.max(0.0);
    match method {
        SaturationMethod::Sqrt => value.sqrt(),
        SaturationMethod::Log => value.ln_1p(),
    }
}

/// Adstock followed by saturation
pub fn transform_spend(x: &[f64], decay: f64, method: SaturationMethod) -> Result<Vec<f64>> {
    let carried = adstock(x, decay)?;
    Ok(saturate(&carried, method))
}
