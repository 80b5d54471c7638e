//! Seeded synthetic weekly marketing data
//!
//! Six channels whose spend moves with a shared marketing intensity, a
//! launch spike in the first four weeks, occasional promos and competitor
//! launches, an annual cycle peaking around the holidays, and ~5% noise.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use mmm_facade::Observation;
use rand::prelude::*;
use rand_distr::Normal;

/// (channel, minimum weekly spend, maximum weekly spend, true sqrt effect)
pub const CHANNELS: [(&str, f64, f64, f64); 6] = [
    ("meta", 15_000.0, 80_000.0, 1.2),
    ("google", 10_000.0, 60_000.0, 1.0),
    ("tiktok", 5_000.0, 40_000.0, 0.7),
    ("reddit", 2_000.0, 15_000.0, 0.3),
    ("x", 3_000.0, 20_000.0, 0.2),
    ("twitch", 5_000.0, 35_000.0, 0.5),
];

pub const DEFAULT_SEED: u64 = 42;

const BASE_SALES: f64 = 50_000.0;
const LAUNCH_SPEND_MULTIPLIER: [f64; 4] = [3.0, 2.5, 1.8, 1.3];
const LAUNCH_SALES_BOOST: [f64; 4] = [80_000.0, 50_000.0, 30_000.0, 15_000.0];
const PROMO_RATE: f64 = 0.08;
const COMPETITOR_RATE: f64 = 0.05;

pub fn channel_names() -> Vec<&'static str> {
    CHANNELS.iter().map(|(name, ..)| *name).collect()
}

/// Generate `n_weeks` of weekly observations starting 2023-01-01
pub fn weekly_data(n_weeks: usize, seed: u64) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(seed);

    let activity: Vec<f64> = (0..n_weeks).map(|_| rng.gen_range(0.5..1.5)).collect();

    let spend: Vec<Vec<f64>> = CHANNELS
        .iter()
        .map(|(_, low, high, _)| {
            (0..n_weeks)
                .map(|week| {
                    let launch = LAUNCH_SPEND_MULTIPLIER.get(week).copied().unwrap_or(1.0);
                    let amount = activity[week] * rng.gen_range(*low..*high) * launch;
                    (amount * 100.0).round() / 100.0
                })
                .collect()
        })
        .collect();

    let promo: Vec<bool> = (0..n_weeks).map(|_| rng.gen::<f64>() < PROMO_RATE).collect();
    let competitor: Vec<bool> = (0..n_weeks)
        .map(|_| rng.gen::<f64>() < COMPETITOR_RATE)
        .collect();

    let noise = Normal::new(1.0, 0.05).expect("valid noise distribution");
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid start date");

    (0..n_weeks)
        .map(|week| {
            let t = week as f64;
            let seasonality = 1.0 + 0.15 * (2.0 * std::f64::consts::PI * (t - 48.0) / 52.0).sin();

            let channel_effect: f64 = CHANNELS
                .iter()
                .zip(&spend)
                .map(|((_, _, _, effect), series)| effect * series[week].sqrt())
                .sum();
            let launch = LAUNCH_SALES_BOOST.get(week).copied().unwrap_or(0.0);

            let lift = 1.0
                + if promo[week] { 0.20 } else { 0.0 }
                + if competitor[week] { -0.10 } else { 0.0 };

            let sales = (BASE_SALES + channel_effect + launch) * seasonality * lift;
            let sales = (sales * rng.sample(noise)).max(0.0).round();

            let mut observation = Observation::new(week, sales)
                .with_date(start + Duration::weeks(week as i64))
                .with_event("promo", promo[week])
                .with_event("competitor_launch", competitor[week]);
            for ((name, ..), series) in CHANNELS.iter().zip(&spend) {
                observation = observation.with_spend(*name, series[week]);
            }
            observation
        })
        .collect()
}

/// Two years of data with the default seed
pub fn two_years() -> Vec<Observation> {
    weekly_data(104, DEFAULT_SEED)
}
