//! Elastic-net regression by cyclic coordinate descent
//!
//! Minimizes
//!
//! ```text
//! 1/(2n) * ||y - Xw - b||^2 + alpha * l1_ratio * ||w||_1
//!                          + 0.5 * alpha * (1 - l1_ratio) * ||w||_2^2
//! ```
//!
//! with an unpenalized intercept `b`. Each coordinate update combines
//! soft-thresholding (L1) with shrinkage (L2) while a running residual keeps
//! an update at O(n).

use mmm_api::{FitFailure, MmmError, RegularizationConfig, Result};
use serde::{Deserialize, Serialize};

/// Solver settings
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticNet {
    alpha: f64,
    l1_ratio: f64,
    max_iter: usize,
    tol: f64,
}

/// Coefficients found by a converged solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticNetSolution {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Full passes over the coordinates
    pub iterations: usize,
    /// Largest coefficient update in the final pass
    pub max_change: f64,
}

impl ElasticNet {
    pub fn new(alpha: f64, l1_ratio: f64) -> Self {
        Self {
            alpha,
            l1_ratio,
            max_iter: 10_000,
            tol: 1e-4,
        }
    }

    pub fn from_config(config: &RegularizationConfig) -> Self {
        Self::new(config.alpha, config.l1_ratio)
            .with_max_iter(config.max_iter)
            .with_tol(config.tol)
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn l1_ratio(&self) -> f64 {
        self.l1_ratio
    }

    fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(MmmError::invalid_parameter("alpha", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.l1_ratio) {
            return Err(MmmError::invalid_parameter(
                "l1_ratio",
                "must be between 0 and 1",
            ));
        }
        if self.max_iter == 0 {
            return Err(MmmError::invalid_parameter("max_iter", "must be at least 1"));
        }
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(MmmError::invalid_parameter("tol", "must be positive"));
        }
        Ok(())
    }

    /// Fit on column-major features.
    ///
    /// Every column must have one value per target entry.
    pub fn fit(&self, columns: &[Vec<f64>], target: &[f64]) -> Result<ElasticNetSolution> {
        self.validate()?;

        let n = target.len();
        if n == 0 {
            return Err(FitFailure::EmptyInput.into());
        }
        if let Some(column) = columns.iter().find(|c| c.len() != n) {
            return Err(FitFailure::LengthMismatch {
                features: column.len(),
                target: n,
            }
            .into());
        }

        let n_f = n as f64;
        let l1 = self.alpha * self.l1_ratio;
        let l2 = self.alpha * (1.0 - self.l1_ratio);

        // Center so the intercept drops out of the coordinate updates
        let y_mean = target.iter().sum::<f64>() / n_f;
        let x_means: Vec<f64> = columns
            .iter()
            .map(|c| c.iter().sum::<f64>() / n_f)
            .collect();
        let centered: Vec<Vec<f64>> = columns
            .iter()
            .zip(&x_means)
            .map(|(c, mean)| c.iter().map(|v| v - mean).collect())
            .collect();
        let norms: Vec<f64> = centered
            .iter()
            .map(|c| c.iter().map(|v| v * v).sum::<f64>() / n_f)
            .collect();

        let mut weights = vec![0.0; columns.len()];
        let mut residual: Vec<f64> = target.iter().map(|y| y - y_mean).collect();

        for iteration in 1..=self.max_iter {
            let mut max_change = 0.0_f64;
            let mut max_weight = 0.0_f64;

            for (j, column) in centered.iter().enumerate() {
                if norms[j] == 0.0 {
                    continue;
                }

                let old = weights[j];
                let rho = column
                    .iter()
                    .zip(&residual)
                    .map(|(x, r)| x * r)
                    .sum::<f64>()
                    / n_f
                    + norms[j] * old;
                let new = soft_threshold(rho, l1) / (norms[j] + l2);

                let delta = new - old;
                if delta != 0.0 {
                    for (r, x) in residual.iter_mut().zip(column) {
                        *r -= x * delta;
                    }
                    weights[j] = new;
                }

                max_change = max_change.max(delta.abs());
                max_weight = max_weight.max(new.abs());
            }

            if max_change <= self.tol * max_weight {
                tracing::debug!(iteration, max_change, "coordinate descent converged");

                let intercept = y_mean
                    - x_means
                        .iter()
                        .zip(&weights)
                        .map(|(m, w)| m * w)
                        .sum::<f64>();
                return Ok(ElasticNetSolution {
                    coefficients: weights,
                    intercept,
                    iterations: iteration,
                    max_change,
                });
            }
        }

        Err(FitFailure::NoConvergence {
            iterations: self.max_iter,
        }
        .into())
    }
}

/// `sign(x) * max(|x| - threshold, 0)`
fn soft_threshold(x: f64, threshold: f64) -> f64 {
    if x > threshold {
        x - threshold
    } else if x < -threshold {
        x + threshold
    } else {
        0.0
    }
}
