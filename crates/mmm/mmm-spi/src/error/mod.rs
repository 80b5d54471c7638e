//! Error types for marketing mix operations
//!
//! This module provides the [`MmmError`] enum and [`Result`] type alias
//! used across every crate of the stack.

mod mmm_error;

pub use mmm_error::{FitFailure, MmmError, Result};
