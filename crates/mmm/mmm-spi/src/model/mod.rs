//! Data model shared across the marketing mix stack

mod decomposition;
mod feature_set;
mod observation;
mod validation;

pub use decomposition::{
    ChannelContribution, Component, ComponentKind, ContributionSummary, Decomposition,
    DecompositionRow,
};
pub use feature_set::{FeatureColumn, FeatureRole, FeatureSet};
pub use observation::{sales, Observation};
pub use validation::{CrossValidationReport, Fold};
