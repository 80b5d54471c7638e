//! Marketing Mix Model Service Provider Interface
//!
//! Defines the contracts, shared data model and error types for the
//! marketing mix modelling stack:
//!
//! - [`MixModel`]: fit/predict contract over weekly observations
//! - [`Decomposer`]: split predictions into additive per-component contributions
//! - [`Observation`], [`FeatureSet`], [`Decomposition`], [`Fold`]: data model
//! - [`MmmError`]: standardized error type for all operations
//! - [`Result`]: convenient result type alias

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Decomposer, MixModel};
pub use error::{FitFailure, MmmError, Result};
pub use model::{
    ChannelContribution, Component, ComponentKind, ContributionSummary, CrossValidationReport,
    Decomposition, DecompositionRow, FeatureColumn, FeatureRole, FeatureSet, Fold, Observation,
};
