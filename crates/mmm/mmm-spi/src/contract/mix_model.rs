//! Fit/predict and decomposition contracts.

use crate::error::Result;
use crate::model::{Decomposition, Observation};

/// A model relating weekly marketing observations to sales.
///
/// Fitting always consumes a full batch window; a successful fit replaces
/// any previous fitted state as a whole, a failed fit leaves it untouched.
///
/// # Example
///
/// ```rust,ignore
/// use mmm_spi::{MixModel, Observation};
///
/// fn holdout<M: MixModel>(model: &mut M, data: &[Observation], split: usize) -> mmm_spi::Result<Vec<f64>> {
///     model.fit(&data[..split])?;
///     model.predict(&data[split..])
/// }
/// ```
pub trait MixModel {
    /// Fit the model to a training window
    fn fit(&mut self, observations: &[Observation]) -> Result<()>;

    /// Predict sales for every observation in a window
    fn predict(&self, observations: &[Observation]) -> Result<Vec<f64>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}

/// Attribution of predictions to base, channels, seasonality and controls.
pub trait Decomposer {
    /// Decompose predictions for a window. Fails with `NotFitted` before a fit.
    fn decompose(&self, observations: &[Observation]) -> Result<Decomposition>;
}
