//! Basic example: fit a marketing mix model and attribute sales to channels
//!
//! Run with: RUST_LOG=mmm_core=debug cargo run --example basic -p mmm-facade

use mmm_facade::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[path = "../tests/common/mod.rs"]
mod common;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mmm_core=info".into()),
        )
        .init();

    println!("=== rustful-mmm Basic Example ===\n");

    // 1. Data
    let data = common::two_years();
    println!("1. Generated {} weeks of synthetic data\n", data.len());

    // 2. Configuration
    let config = ModelConfig::builder()
        .decay("meta", 0.6)
        .decay("twitch", 0.3)
        .discover_channels(&data)
        .build()?;
    println!("2. Channels");
    for channel in &config.channels {
        println!("   {:<8} decay {:.2}", channel.name, channel.decay);
    }
    println!();

    // 3. Fit
    let mut model = MarketingMixModel::new(config);
    model.fit(&data)?;
    let fitted = model.fitted()?;
    println!("3. {}\n", fitted.coefficient_summary(0.01));

    // 4. Attribution
    let decomposition = model.decompose(&data)?;
    let summary = ContributionSummary::from_decomposition(&decomposition);
    println!("4. Contributions over {} weeks", decomposition.len());
    println!("   {:<12} {:>14.0} ({:>5.1}%)", "base", summary.base, summary.base_share * 100.0);
    for channel in &summary.channels {
        println!(
            "   {:<12} {:>14.0} ({:>5.1}%)",
            channel.channel,
            channel.contribution,
            channel.share * 100.0
        );
    }
    println!("   {:<12} {:>14.0}", "seasonality", summary.seasonality);
    for (flag, total) in &summary.controls {
        println!("   {:<12} {:>14.0}", flag, total);
    }
    println!();

    // 5. Validation
    let report = model.cross_validate(&data, &CrossValidationConfig::default().parallel(true))?;
    println!("5. {}", report.summary());

    Ok(())
}
