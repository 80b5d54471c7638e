//! Marketing mix error types

use thiserror::Error;

/// Result type alias for marketing mix operations
pub type Result<T> = std::result::Result<T, MmmError>;

/// Errors that can occur while building features, fitting, predicting,
/// decomposing or validating a marketing mix model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MmmError {
    /// Malformed configuration value (decay rate, saturation method, penalty, window length)
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Feature set shape or order disagrees with the fitted model
    #[error("Schema mismatch: expected features {expected:?}, got {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Operation requires a prior fit
    #[error("Model must be fitted before use")]
    NotFitted,

    /// Training failed; no model was produced
    #[error("Fit failed: {0}")]
    FitError(FitFailure),

    /// Observations violate the data contract
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Reason a fit could not produce a model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitFailure {
    /// No training rows
    #[error("training input is empty")]
    EmptyInput,

    /// Target length differs from the number of feature rows
    #[error("target has {target} values but features have {features} rows")]
    LengthMismatch { features: usize, target: usize },

    /// Coordinate descent hit its iteration cap
    #[error("optimizer did not converge after {iterations} iterations")]
    NoConvergence { iterations: usize },
}

impl From<FitFailure> for MmmError {
    fn from(failure: FitFailure) -> Self {
        MmmError::FitError(failure)
    }
}

impl MmmError {
    /// Shorthand for [`MmmError::InvalidParameter`]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        MmmError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
