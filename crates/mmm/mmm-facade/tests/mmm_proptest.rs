//! Property tests for decomposition reconciliation
//!
//! Each case fits a fresh model on a randomly seeded, randomly offset window
//! with random regularization, so these run fewer cases than the transform
//! properties.

mod common;

use mmm_facade::prelude::*;
use mmm_facade::RECONCILIATION_TOLERANCE;
use proptest::prelude::*;

fn fitted(observations: &[Observation], alpha: f64, l1_ratio: f64) -> MarketingMixModel {
    let config = ModelConfig::builder()
        .discover_channels(observations)
        .alpha(alpha)
        .l1_ratio(l1_ratio)
        .max_iter(100_000)
        .build()
        .unwrap();
    let mut model = MarketingMixModel::new(config);
    model.fit(observations).unwrap();
    model
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Base plus every component equals the direct prediction, in and out of sample.
    #[test]
    fn prop_decomposition_reconciles(
        seed in any::<u64>(),
        offset in 0_usize..24,
        alpha in 0.01_f64..5.0,
        l1_ratio in 0.0_f64..=1.0
    ) {
        let data = common::weekly_data(offset + 56, seed);
        let train = &data[offset..offset + 44];
        let holdout = &data[offset + 44..];
        let model = fitted(train, alpha, l1_ratio);

        for window in [train, holdout] {
            let decomposition = model.decompose(window).unwrap();
            let predictions = model.predict(window).unwrap();
            let error = decomposition.max_relative_error(&predictions);
            prop_assert!(error <= RECONCILIATION_TOLERANCE, "relative error {}", error);

            for (i, predicted) in predictions.iter().enumerate() {
                let total: f64 = decomposition.components().iter().map(|c| c.values[i]).sum();
                prop_assert!((total - predicted).abs() <= RECONCILIATION_TOLERANCE * predicted.abs().max(1.0));
            }
        }
    }
}
