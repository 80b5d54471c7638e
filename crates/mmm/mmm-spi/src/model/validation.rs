//! Rolling-origin cross-validation results.

use serde::{Deserialize, Serialize};

/// One completed rolling-origin iteration.
///
/// Training covers `[0, train_weeks)`, testing covers `[test_start, test_end)`,
/// and `test_start >= train_weeks` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fold {
    pub index: usize,
    pub train_weeks: usize,
    pub test_start: usize,
    pub test_end: usize,
    pub mae: f64,
    pub mape: f64,
    pub r2: f64,
}

impl Fold {
    pub fn test_len(&self) -> usize {
        self.test_end - self.test_start
    }
}

/// Per-fold metrics plus their averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationReport {
    pub folds: Vec<Fold>,
    /// NaN when no fold completed
    pub avg_mae: f64,
    /// NaN when no fold completed
    pub avg_mape: f64,
    /// NaN when no fold completed
    pub avg_r2: f64,
}

impl CrossValidationReport {
    /// Create a report, averaging each metric across folds.
    pub fn from_folds(folds: Vec<Fold>) -> Self {
        let mean = |metric: fn(&Fold) -> f64| {
            if folds.is_empty() {
                f64::NAN
            } else {
                folds.iter().map(metric).sum::<f64>() / folds.len() as f64
            }
        };

        Self {
            avg_mae: mean(|f| f.mae),
            avg_mape: mean(|f| f.mape),
            avg_r2: mean(|f| f.r2),
            folds,
        }
    }

    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }

    /// Print summary
    pub fn summary(&self) -> String {
        format!(
            "Rolling-Origin CV:\n  Folds: {}\n  Mean MAE: {:.2}\n  Mean MAPE: {:.4}\n  Mean R2: {:.4}",
            self.n_folds(),
            self.avg_mae,
            self.avg_mape,
            self.avg_r2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(index: usize, mae: f64) -> Fold {
        Fold {
            index,
            train_weeks: 52 + index * 4,
            test_start: 52 + index * 4,
            test_end: 56 + index * 4,
            mae,
            mape: mae / 1000.0,
            r2: 0.5,
        }
    }

    #[test]
    fn test_averages() {
        let report = CrossValidationReport::from_folds(vec![fold(0, 100.0), fold(1, 300.0)]);
        assert_eq!(report.n_folds(), 2);
        assert!((report.avg_mae - 200.0).abs() < 1e-12);
        assert!((report.avg_mape - 0.2).abs() < 1e-12);
        assert!((report.avg_r2 - 0.5).abs() < 1e-12);
        assert_eq!(report.folds[1].test_len(), 4);
    }

    #[test]
    fn test_empty_report_is_nan() {
        let report = CrossValidationReport::from_folds(Vec::new());
        assert_eq!(report.n_folds(), 0);
        assert!(report.avg_mae.is_nan());
        assert!(report.avg_mape.is_nan());
        assert!(report.avg_r2.is_nan());
        assert!(report.summary().contains("Folds: 0"));
    }
}
