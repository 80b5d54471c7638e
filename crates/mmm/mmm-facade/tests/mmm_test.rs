//! Behaviour tests for the marketing mix building blocks

use mmm_facade::metrics::{mae, mape, r_squared, rmse};
use mmm_facade::prelude::*;

// ========== Transforms ==========

#[test]
fn adstock_zero_decay_is_identity() {
    let spend = vec![12.0, 0.0, 7.0, 3.0, 0.0];
    assert_eq!(adstock(&spend, 0.0).unwrap(), spend);
}

#[test]
fn adstock_full_decay_accumulates() {
    let carried = adstock(&[100.0, 100.0, 100.0], 1.0).unwrap();
    assert_eq!(carried[2], 300.0);
}

#[test]
fn adstock_half_decay_impulse() {
    let carried = adstock(&[100.0, 0.0, 0.0, 0.0], 0.5).unwrap();
    assert_eq!(carried, vec![100.0, 50.0, 25.0, 12.5]);
}

#[test]
fn adstock_rejects_decay_outside_unit_interval() {
    assert!(matches!(
        adstock(&[1.0, 2.0], 1.5),
        Err(MmmError::InvalidParameter { .. })
    ));
}

#[test]
fn sqrt_saturation_values() {
    assert_eq!(
        saturate(&[0.0, 1.0, 4.0, 100.0], SaturationMethod::Sqrt),
        vec![0.0, 1.0, 2.0, 10.0]
    );
}

#[test]
fn log_saturation_of_zero_is_zero() {
    assert_eq!(saturate(&[0.0], SaturationMethod::Log), vec![0.0]);
}

#[test]
fn saturation_is_monotone() {
    let spend: Vec<f64> = (0..100).map(|i| i as f64 * 137.0).collect();
    for method in [SaturationMethod::Sqrt, SaturationMethod::Log] {
        let out = saturate(&spend, method);
        assert!(out.windows(2).all(|w| w[1] >= w[0]), "{} is not monotone", method);
    }
}

#[test]
fn unknown_saturation_name_is_rejected() {
    let err = "hill".parse::<SaturationMethod>().unwrap_err();
    assert!(matches!(err, MmmError::InvalidParameter { .. }));
    assert!(err.to_string().contains("saturation"));
}

#[test]
fn transform_spend_chains_adstock_and_saturation() {
    let out = transform_spend(&[100.0, 0.0], 0.44, SaturationMethod::Sqrt).unwrap();
    assert_eq!(out[0], 10.0);
    assert!((out[1] - 44.0_f64.sqrt()).abs() < 1e-12);
}

// ========== Metrics ==========

#[test]
fn metrics_on_perfect_prediction() {
    let y = vec![120.0, 80.0, 95.0, 130.0];
    assert_eq!(mae(&y, &y), 0.0);
    assert_eq!(rmse(&y, &y), 0.0);
    assert_eq!(r_squared(&y, &y), 1.0);
}

#[test]
fn predicting_the_mean_scores_zero_r2() {
    let y = vec![2.0, 4.0, 6.0, 8.0];
    assert!(r_squared(&y, &[5.0; 4]).abs() < 1e-12);
}

#[test]
fn mape_is_a_fraction() {
    assert!((mape(&[100.0, 200.0], &[90.0, 180.0]) - 0.10).abs() < 1e-12);
}

#[test]
fn metrics_summary_bundles_all_scores() {
    let summary = MetricsSummary::compute(&[100.0, 200.0], &[110.0, 190.0]);
    assert_eq!(summary.mae, 10.0);
    assert_eq!(summary.rmse, 10.0);
    assert!((summary.mape - 0.075).abs() < 1e-12);
}

// ========== Configuration ==========

#[test]
fn default_configuration() {
    let config = ModelConfig::default();
    assert_eq!(config.default_decay, 0.5);
    assert_eq!(config.saturation, SaturationMethod::Sqrt);
    assert_eq!(config.fourier_terms, 2);
    assert_eq!(config.regularization.alpha, 1.0);
    assert_eq!(config.regularization.l1_ratio, 0.5);
    assert_eq!(config.regularization.max_iter, 10_000);
}

#[test]
fn configuration_is_validated_on_build() {
    assert!(ModelConfig::builder().channel("meta", 0.5).build().is_ok());
    assert!(ModelConfig::builder().channel("meta", -0.5).build().is_err());
    assert!(ModelConfig::builder().l1_ratio(-0.1).build().is_err());
}

#[test]
fn configuration_from_json() {
    let config = ModelConfig::from_json(
        r#"{"channels": [{"name": "meta", "decay": 0.3}], "saturation": "log", "fourier_terms": 1}"#,
    )
    .unwrap();
    assert_eq!(config.channels, vec![ChannelSpec::new("meta", 0.3)]);
    assert_eq!(config.saturation, SaturationMethod::Log);
    assert_eq!(config.fourier_terms, 1);
}

#[test]
fn configuration_round_trips_through_json() {
    let config = ModelConfig::builder()
        .channel_spec(ChannelSpec::new("meta", 0.7).with_saturation(SaturationMethod::Log))
        .channel("google", 0.2)
        .alpha(0.25)
        .build()
        .unwrap();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(ModelConfig::from_json(&json).unwrap(), config);
}

// ========== Feature builder ==========

#[test]
fn feature_names_follow_fixed_order() {
    let observations: Vec<Observation> = (0..6)
        .map(|week| {
            Observation::new(week, 100.0)
                .with_spend("meta", 10.0)
                .with_spend("google", 20.0)
                .with_event("competitor_launch", false)
                .with_event("promo", week == 2)
        })
        .collect();
    let config = ModelConfig::builder()
        .discover_channels(&observations)
        .build()
        .unwrap();

    let features = FeatureBuilder::new(&config).build(&observations).unwrap();
    assert_eq!(
        features.names(),
        vec![
            "google_transformed",
            "meta_transformed",
            "sin_1",
            "cos_1",
            "sin_2",
            "cos_2",
            "promo",
            "competitor_launch"
        ]
    );
}
