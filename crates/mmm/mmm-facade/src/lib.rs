//! Marketing Mix Facade
//!
//! High-level API for marketing mix modelling. Re-exports all public types
//! from the mmm stack for convenient usage.
//!
//! # Example
//!
//! ```ignore
//! use mmm_facade::prelude::*;
//!
//! let observations: Vec<Observation> = load_weekly_data();
//! let config = ModelConfig::builder()
//!     .discover_channels(&observations)
//!     .build()?;
//!
//! let mut model = MarketingMixModel::new(config);
//! model.fit(&observations)?;
//!
//! let decomposition = model.decompose(&observations)?;
//! let summary = ContributionSummary::from_decomposition(&decomposition);
//! for channel in &summary.channels {
//!     println!("{}: {:.1}%", channel.channel, channel.share * 100.0);
//! }
//! ```

// Re-export everything from core (which includes API and SPI)
pub use mmm_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Traits
    pub use mmm_spi::{Decomposer, MixModel};

    // Configuration
    pub use mmm_api::{
        ChannelSpec, CrossValidationConfig, ModelConfig, ModelConfigBuilder, RegularizationConfig,
        SaturationMethod,
    };

    // Data model and errors
    pub use mmm_spi::{
        ContributionSummary, CrossValidationReport, Decomposition, FeatureRole, FeatureSet,
        FitFailure, Fold, MmmError, Observation, Result,
    };

    // Implementations
    pub use mmm_core::{
        adstock, decompose, rolling_origin_cv, saturate, transform_spend, CoefficientSummary,
        FeatureBuilder, FittedModel, MarketingMixModel, MetricsSummary,
    };
}
