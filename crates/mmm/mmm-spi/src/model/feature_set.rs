//! Named design matrix with per-column provenance.

use crate::error::{MmmError, Result};
use serde::{Deserialize, Serialize};

/// Where a feature column came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureRole {
    /// Adstocked and saturated spend of one channel
    Channel { channel: String },
    /// One Fourier term of the annual cycle
    Seasonal { harmonic: usize },
    /// Binary control flag
    Control { flag: String },
}

/// One named column of the design matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureColumn {
    pub name: String,
    pub role: FeatureRole,
    pub values: Vec<f64>,
}

/// Ordered, named design matrix stored column-major.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    columns: Vec<FeatureColumn>,
    n_rows: usize,
}

impl FeatureSet {
    /// Create an empty feature set with a fixed number of rows.
    pub fn with_rows(n_rows: usize) -> Self {
        Self {
            columns: Vec::new(),
            n_rows,
        }
    }

    /// Append a column. Its length must equal the row count.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        role: FeatureRole,
        values: Vec<f64>,
    ) -> Result<()> {
        let name = name.into();
        if values.len() != self.n_rows {
            return Err(MmmError::InvalidData(format!(
                "feature '{}' has {} values, expected {}",
                name,
                values.len(),
                self.n_rows
            )));
        }
        if self.column(&name).is_some() {
            return Err(MmmError::InvalidData(format!(
                "duplicate feature name '{}'",
                name
            )));
        }
        self.columns.push(FeatureColumn { name, role, values });
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    /// Feature names in column order.
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&FeatureColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns with the given role predicate, in order.
    pub fn columns_where<'a>(
        &'a self,
        predicate: impl Fn(&FeatureRole) -> bool + 'a,
    ) -> impl Iterator<Item = &'a FeatureColumn> + 'a {
        self.columns.iter().filter(move |c| predicate(&c.role))
    }
}
