//! Marketing Mix Consumer API
//!
//! Configuration types for marketing mix consumers. A [`ModelConfig`] is an
//! explicit, immutable value: the feature builder reads nothing else, and a
//! fitted model keeps the exact configuration it was trained with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// Re-export SPI types
pub use mmm_spi::{
    ChannelContribution, Component, ComponentKind, ContributionSummary, CrossValidationReport,
    Decomposer, Decomposition, DecompositionRow, FeatureColumn, FeatureRole, FeatureSet,
    FitFailure, Fold, MixModel, MmmError, Observation, Result,
};

/// Default carryover retained per period when a channel has no explicit rate
pub const DEFAULT_DECAY: f64 = 0.5;

/// Periods per annual cycle
pub const DEFAULT_SEASONAL_PERIOD: f64 = 52.0;

/// Control flags recognized when present in the data
pub const DEFAULT_CONTROLS: [&str; 2] = ["promo", "competitor_launch"];

/// Diminishing-returns curve applied after adstock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SaturationMethod {
    /// `sqrt(x)`: moderate saturation
    #[default]
    Sqrt,
    /// `ln(1 + x)`: aggressive saturation
    Log,
}

impl FromStr for SaturationMethod {
    type Err = MmmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqrt" => Ok(SaturationMethod::Sqrt),
            "log" => Ok(SaturationMethod::Log),
            other => Err(MmmError::invalid_parameter(
                "saturation",
                format!("unknown method '{}', use 'sqrt' or 'log'", other),
            )),
        }
    }
}

impl fmt::Display for SaturationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaturationMethod::Sqrt => write!(f, "sqrt"),
            SaturationMethod::Log => write!(f, "log"),
        }
    }
}

/// One marketing channel: the unit of attribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Spend field name in [`Observation::spend`]
    pub name: String,
    /// Adstock retention rate in [0, 1]
    pub decay: f64,
    /// Overrides the model-wide saturation method for this channel
    #[serde(default)]
    pub saturation: Option<SaturationMethod>,
}

impl ChannelSpec {
    pub fn new(name: impl Into<String>, decay: f64) -> Self {
        Self {
            name: name.into(),
            decay,
            saturation: None,
        }
    }

    /// Use a channel-specific saturation curve
    pub fn with_saturation(mut self, method: SaturationMethod) -> Self {
        self.saturation = Some(method);
        self
    }

    /// Feature name of this channel's transformed spend
    pub fn feature_name(&self) -> String {
        format!("{}_transformed", self.name)
    }

    /// Saturation method after applying the model-wide fallback
    pub fn saturation_or(&self, fallback: SaturationMethod) -> SaturationMethod {
        self.saturation.unwrap_or(fallback)
    }
}

/// Elastic-net penalty and solver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegularizationConfig {
    /// Overall penalty strength (>= 0)
    pub alpha: f64,
    /// Mix between L1 and L2 (1.0 = lasso, 0.0 = ridge)
    pub l1_ratio: f64,
    /// Coordinate descent iteration cap
    pub max_iter: usize,
    /// Convergence tolerance on the largest coefficient update
    pub tol: f64,
}

impl Default for RegularizationConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            l1_ratio: 0.5,
            max_iter: 10_000,
            tol: 1e-4,
        }
    }
}

/// Complete, immutable model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Ordered channel descriptors. When empty, channels are discovered from
    /// the spend fields of the training window.
    pub channels: Vec<ChannelSpec>,
    /// Decay used for discovered channels without an entry in `decay_rates`
    pub default_decay: f64,
    /// Per-channel decay for discovered channels
    pub decay_rates: BTreeMap<String, f64>,
    /// Model-wide saturation method
    pub saturation: SaturationMethod,
    /// Number of sin/cos pairs
    pub fourier_terms: usize,
    /// Periods per seasonal cycle
    pub seasonal_period: f64,
    /// Control flags recognized when present
    pub controls: Vec<String>,
    pub regularization: RegularizationConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            default_decay: DEFAULT_DECAY,
            decay_rates: BTreeMap::new(),
            saturation: SaturationMethod::default(),
            fourier_terms: 2,
            seasonal_period: DEFAULT_SEASONAL_PERIOD,
            controls: DEFAULT_CONTROLS.iter().map(|c| c.to_string()).collect(),
            regularization: RegularizationConfig::default(),
        }
    }
}

impl ModelConfig {
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::new()
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ModelConfig = serde_json::from_str(json)
            .map_err(|e| MmmError::invalid_parameter("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter range
    pub fn validate(&self) -> Result<()> {
        validate_decay("default_decay", self.default_decay)?;
        for (channel, rate) in &self.decay_rates {
            validate_decay(&format!("decay_rates.{}", channel), *rate)?;
        }

        let mut seen = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            if channel.name.is_empty() {
                return Err(MmmError::invalid_parameter(
                    "channels",
                    "channel name must not be empty",
                ));
            }
            if seen.contains(&channel.name.as_str()) {
                return Err(MmmError::invalid_parameter(
                    "channels",
                    format!("channel '{}' is configured twice", channel.name),
                ));
            }
            seen.push(channel.name.as_str());
            validate_decay(&format!("{}.decay", channel.name), channel.decay)?;
        }

        if !(self.seasonal_period.is_finite() && self.seasonal_period > 0.0) {
            return Err(MmmError::invalid_parameter(
                "seasonal_period",
                "must be a positive number of periods",
            ));
        }

        let reg = &self.regularization;
        if !(reg.alpha.is_finite() && reg.alpha >= 0.0) {
            return Err(MmmError::invalid_parameter("alpha", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&reg.l1_ratio) {
            return Err(MmmError::invalid_parameter(
                "l1_ratio",
                "must be between 0 and 1",
            ));
        }
        if reg.max_iter == 0 {
            return Err(MmmError::invalid_parameter("max_iter", "must be at least 1"));
        }
        if !(reg.tol.is_finite() && reg.tol > 0.0) {
            return Err(MmmError::invalid_parameter("tol", "must be positive"));
        }
        Ok(())
    }

    /// Copy of this configuration with channels resolved.
    ///
    /// Explicit channels are kept as configured. Otherwise every spend field
    /// of the window becomes a channel, in name order, with its rate from
    /// `decay_rates` or `default_decay`.
    pub fn resolve_channels(&self, observations: &[Observation]) -> Result<ModelConfig> {
        if !self.channels.is_empty() {
            return Ok(self.clone());
        }

        let mut names: Vec<&str> = observations
            .iter()
            .flat_map(|o| o.channels())
            .collect();
        names.sort_unstable();
        names.dedup();

        let mut resolved = self.clone();
        resolved.channels = names
            .into_iter()
            .map(|name| {
                let decay = self
                    .decay_rates
                    .get(name)
                    .copied()
                    .unwrap_or(self.default_decay);
                ChannelSpec::new(name, decay)
            })
            .collect();
        resolved.validate()?;
        Ok(resolved)
    }

    /// Channel descriptor by name
    pub fn channel(&self, name: &str) -> Option<&ChannelSpec> {
        self.channels.iter().find(|c| c.name == name)
    }
}

fn validate_decay(name: &str, decay: f64) -> Result<()> {
    if (0.0..=1.0).contains(&decay) {
        Ok(())
    } else {
        Err(MmmError::invalid_parameter(
            name,
            format!("decay rate {} must be between 0 and 1", decay),
        ))
    }
}

/// Builder for [`ModelConfig`]
#[derive(Debug, Clone, Default)]
pub struct ModelConfigBuilder {
    config: ModelConfig,
}

impl ModelConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ModelConfig::default(),
        }
    }

    // ========== Channel Methods ==========

    /// Add a channel with an explicit decay rate
    pub fn channel(mut self, name: impl Into<String>, decay: f64) -> Self {
        self.config.channels.push(ChannelSpec::new(name, decay));
        self
    }

    /// Add a fully specified channel
    pub fn channel_spec(mut self, spec: ChannelSpec) -> Self {
        self.config.channels.push(spec);
        self
    }

    /// Decay rate for a channel found by discovery
    pub fn decay(mut self, channel: impl Into<String>, rate: f64) -> Self {
        self.config.decay_rates.insert(channel.into(), rate);
        self
    }

    /// Decay rate for discovered channels without an explicit rate
    pub fn default_decay(mut self, rate: f64) -> Self {
        self.config.default_decay = rate;
        self
    }

    /// Add every spend field of the observations that is not configured yet
    pub fn discover_channels(mut self, observations: &[Observation]) -> Self {
        let mut names: Vec<String> = observations
            .iter()
            .flat_map(|o| o.channels())
            .filter(|name| self.config.channel(name).is_none())
            .map(str::to_string)
            .collect();
        names.sort_unstable();
        names.dedup();

        for name in names {
            let decay = self
                .config
                .decay_rates
                .get(&name)
                .copied()
                .unwrap_or(self.config.default_decay);
            self.config.channels.push(ChannelSpec::new(name, decay));
        }
        self
    }

    // ========== Feature Methods ==========

    pub fn saturation(mut self, method: SaturationMethod) -> Self {
        self.config.saturation = method;
        self
    }

    pub fn fourier_terms(mut self, k: usize) -> Self {
        self.config.fourier_terms = k;
        self
    }

    pub fn seasonal_period(mut self, period: f64) -> Self {
        self.config.seasonal_period = period;
        self
    }

    /// Replace the recognized control flags
    pub fn controls<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.controls = flags.into_iter().map(Into::into).collect();
        self
    }

    // ========== Regularization Methods ==========

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.regularization.alpha = alpha;
        self
    }

    pub fn l1_ratio(mut self, l1_ratio: f64) -> Self {
        self.config.regularization.l1_ratio = l1_ratio;
        self
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.regularization.max_iter = max_iter;
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.config.regularization.tol = tol;
        self
    }

    /// Validate and produce the configuration
    pub fn build(self) -> Result<ModelConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Rolling-origin cross-validation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossValidationConfig {
    /// Training periods before the first test window
    pub min_train_weeks: usize,
    /// Periods predicted per fold
    pub test_weeks: usize,
    /// Periods added to the training window between folds
    pub step: usize,
    /// Run folds on the rayon thread pool
    pub parallel: bool,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            min_train_weeks: 52,
            test_weeks: 4,
            step: 4,
            parallel: false,
        }
    }
}

impl CrossValidationConfig {
    pub fn new(min_train_weeks: usize, test_weeks: usize, step: usize) -> Self {
        Self {
            min_train_weeks,
            test_weeks,
            step,
            parallel: false,
        }
    }

    /// Enable or disable parallel fold execution
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("min_train_weeks", self.min_train_weeks),
            ("test_weeks", self.test_weeks),
            ("step", self.step),
        ] {
            if value == 0 {
                return Err(MmmError::invalid_parameter(name, "must be a positive number of periods"));
            }
        }
        Ok(())
    }
}
