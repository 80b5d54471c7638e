//! Marketing Mix Core Implementations
//!
//! Implementations behind the marketing mix contracts:
//!
//! - [`transform`]: adstock carryover and saturation curves
//! - [`features`]: design matrix construction
//! - [`scaler`], [`elastic_net`], [`model`]: standardization, solver, fitted model
//! - [`decomposition`]: per-component attribution of predictions
//! - [`validation`], [`metrics`]: rolling-origin cross-validation and its scores
//!
//! ## Example
//!
//! ```rust
//! use mmm_core::prelude::*;
//!
//! let data: Vec<Observation> = (0..30)
//!     .map(|week| {
//!         let spend = 100.0 + (week % 4) as f64 * 50.0;
//!         Observation::new(week, 1000.0 + 8.0 * spend.sqrt()).with_spend("meta", spend)
//!     })
//!     .collect();
//!
//! let config = ModelConfig::builder().channel("meta", 0.3).alpha(0.1).build().unwrap();
//! let mut model = MarketingMixModel::new(config);
//! model.fit(&data).unwrap();
//! let decomposition = model.decompose(&data).unwrap();
//! assert_eq!(decomposition.channels().len(), 1);
//! ```

pub mod decomposition;
pub mod elastic_net;
pub mod features;
pub mod metrics;
pub mod model;
pub mod scaler;
pub mod transform;
pub mod validation;

// Re-export from API for convenience
pub use mmm_api::{
    ChannelSpec, CrossValidationConfig, ModelConfig, ModelConfigBuilder, RegularizationConfig,
    SaturationMethod,
};

// Re-export SPI contracts and data model
pub use mmm_spi::{
    ChannelContribution, Component, ComponentKind, ContributionSummary, CrossValidationReport,
    Decomposer, Decomposition, DecompositionRow, FeatureColumn, FeatureRole, FeatureSet,
    FitFailure, Fold, MixModel, MmmError, Observation, Result,
};

// Re-export implementations for convenience
pub use decomposition::{decompose, RECONCILIATION_TOLERANCE};
pub use elastic_net::{ElasticNet, ElasticNetSolution};
pub use features::FeatureBuilder;
pub use metrics::MetricsSummary;
pub use model::{CoefficientSummary, FitDiagnostics, FittedModel, MarketingMixModel};
pub use scaler::Standardization;
pub use transform::{adstock, saturate, transform_spend};
pub use validation::{expanding_window_splits, rolling_origin_cv};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        adstock, decompose, rolling_origin_cv, saturate, ChannelSpec, ContributionSummary,
        CrossValidationConfig, CrossValidationReport, Decomposer, Decomposition, FeatureBuilder,
        FittedModel, MarketingMixModel, MixModel, MmmError, ModelConfig, Observation, Result,
        SaturationMethod,
    };
}
