//! Contract traits for marketing mix implementations
//!
//! - [`MixModel`]: fit on a window of observations, predict another window
//! - [`Decomposer`]: attribute predictions to additive components

mod mix_model;

pub use mix_model::{Decomposer, MixModel};
