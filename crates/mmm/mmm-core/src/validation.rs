//! Rolling-origin cross-validation
//!
//! Each fold trains a fresh model on `[0, end)` and scores it on the
//! following `test_weeks` observations, so no fold ever sees data from its
//! own test window or later.

use crate::metrics;
use mmm_api::{CrossValidationConfig, CrossValidationReport, Fold, MixModel, Observation, Result};
use mmm_spi::model::sales;
use rayon::prelude::*;
use std::ops::Range;

/// Expanding-window splits
///
/// Training covers `[0, end)` and testing `[end, end + test_len)`, starting
/// at `end = min_train` and advancing by `step` while the test window fits.
///
/// # Returns
///
/// Vector of (train_range, test_range) tuples
pub fn expanding_window_splits(
    data_len: usize,
    min_train: usize,
    test_len: usize,
    step: usize,
) -> Vec<(Range<usize>, Range<usize>)> {
    let mut splits = Vec::new();
    let step = step.max(1);

    let mut train_end = min_train;
    while let Some(test_end) = train_end.checked_add(test_len) {
        if test_end > data_len {
            break;
        }
        splits.push((0..train_end, train_end..test_end));
        train_end = match train_end.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }

    splits
}

/// Run rolling-origin cross-validation
///
/// # Type Parameters
///
/// * `M` - Model type under evaluation
/// * `F` - Factory creating a fresh, unfitted model per fold
///
/// Any fold error aborts the run. With `cv_config.parallel` the folds are
/// evaluated on the rayon pool; folds are reported in index order either way.
pub fn rolling_origin_cv<M, F>(
    observations: &[Observation],
    cv_config: &CrossValidationConfig,
    factory: F,
) -> Result<CrossValidationReport>
where
    M: MixModel,
    F: Fn() -> Result<M> + Sync,
{
    cv_config.validate()?;

    let splits = expanding_window_splits(
        observations.len(),
        cv_config.min_train_weeks,
        cv_config.test_weeks,
        cv_config.step,
    );

    if splits.is_empty() {
        tracing::warn!(
            observations = observations.len(),
            min_train_weeks = cv_config.min_train_weeks,
            test_weeks = cv_config.test_weeks,
            "not enough observations for a single fold"
        );
        return Ok(CrossValidationReport::from_folds(Vec::new()));
    }

    let run = |(index, (train, test)): (usize, &(Range<usize>, Range<usize>))| {
        run_fold(index, observations, train.clone(), test.clone(), &factory)
    };

    let folds = if cv_config.parallel {
        splits.par_iter().enumerate().map(run).collect::<Result<Vec<_>>>()?
    } else {
        splits.iter().enumerate().map(run).collect::<Result<Vec<_>>>()?
    };

    let report = CrossValidationReport::from_folds(folds);
    tracing::info!(
        folds = report.n_folds(),
        avg_mae = report.avg_mae,
        avg_mape = report.avg_mape,
        avg_r2 = report.avg_r2,
        "cross-validation complete"
    );
    Ok(report)
}

fn run_fold<M, F>(
    index: usize,
    observations: &[Observation],
    train: Range<usize>,
    test: Range<usize>,
    factory: &F,
) -> Result<Fold>
where
    M: MixModel,
    F: Fn() -> Result<M>,
{
    let mut model = factory()?;
    model.fit(&observations[train.clone()])?;

    let window = &observations[test.clone()];
    let predictions = model.predict(window)?;
    let actual = sales(window);

    let fold = Fold {
        index,
        train_weeks: train.end,
        test_start: test.start,
        test_end: test.end,
        mae: metrics::mae(&actual, &predictions),
        mape: metrics::mape(&actual, &predictions),
        r2: metrics::r_squared(&actual, &predictions),
    };
    tracing::info!(
        fold = index,
        train_weeks = fold.train_weeks,
        mae = fold.mae,
        mape = fold.mape,
        "fold complete"
    );
    Ok(fold)
}
