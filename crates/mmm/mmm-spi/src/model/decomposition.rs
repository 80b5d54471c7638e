//! Additive sales decomposition and its aggregate summary.

use crate::error::{MmmError, Result};
use serde::{Deserialize, Serialize};

/// Semantic group of a decomposition component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Organic baseline (intercept plus mean correction)
    Base,
    /// One marketing channel
    Channel,
    /// All Fourier terms combined
    Seasonality,
    /// One binary control flag
    Control,
}

/// Borrowed view of one component series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component<'a> {
    pub name: &'a str,
    pub kind: ComponentKind,
    pub values: &'a [f64],
}

/// Per-observation contributions of every model component.
///
/// `predicted` is always the sum of [`Decomposition::components`], which
/// enumerates every field explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    weeks: Vec<usize>,
    base: Vec<f64>,
    channels: Vec<(String, Vec<f64>)>,
    seasonality: Vec<f64>,
    controls: Vec<(String, Vec<f64>)>,
    predicted: Vec<f64>,
}

/// One flat row of a decomposition, ready for tabular export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionRow {
    pub week: usize,
    pub components: Vec<(String, f64)>,
    pub predicted: f64,
}

impl Decomposition {
    /// Assemble a decomposition and compute `predicted` from its components.
    pub fn new(
        weeks: Vec<usize>,
        base: Vec<f64>,
        channels: Vec<(String, Vec<f64>)>,
        seasonality: Vec<f64>,
        controls: Vec<(String, Vec<f64>)>,
    ) -> Result<Self> {
        let n = weeks.len();
        let lengths_match = base.len() == n
            && seasonality.len() == n
            && channels.iter().all(|(_, v)| v.len() == n)
            && controls.iter().all(|(_, v)| v.len() == n);
        if !lengths_match {
            return Err(MmmError::InvalidData(
                "decomposition components must all cover the same observations".to_string(),
            ));
        }

        let mut decomposition = Self {
            weeks,
            base,
            channels,
            seasonality,
            controls,
            predicted: Vec::new(),
        };

        let mut predicted = vec![0.0; n];
        for component in decomposition.components() {
            for (total, value) in predicted.iter_mut().zip(component.values) {
                *total += value;
            }
        }
        decomposition.predicted = predicted;
        Ok(decomposition)
    }

    /// Every component, in a fixed order: base, channels, seasonality, controls.
    pub fn components(&self) -> Vec<Component<'_>> {
        // Destructured so that a new field cannot be added without deciding
        // whether it participates in the sum.
        let Decomposition {
            weeks: _,
            base,
            channels,
            seasonality,
            controls,
            predicted: _,
        } = self;

        let mut components = Vec::with_capacity(2 + channels.len() + controls.len());
        components.push(Component {
            name: "base",
            kind: ComponentKind::Base,
            values: base,
        });
        for (name, values) in channels {
            components.push(Component {
                name,
                kind: ComponentKind::Channel,
                values,
            });
        }
        components.push(Component {
            name: "seasonality",
            kind: ComponentKind::Seasonality,
            values: seasonality,
        });
        for (name, values) in controls {
            components.push(Component {
                name,
                kind: ComponentKind::Control,
                values,
            });
        }
        components
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn weeks(&self) -> &[usize] {
        &self.weeks
    }

    pub fn base(&self) -> &[f64] {
        &self.base
    }

    pub fn seasonality(&self) -> &[f64] {
        &self.seasonality
    }

    pub fn predicted(&self) -> &[f64] {
        &self.predicted
    }

    /// Channel series in model order.
    pub fn channels(&self) -> &[(String, Vec<f64>)] {
        &self.channels
    }

    /// Control series in model order.
    pub fn controls(&self) -> &[(String, Vec<f64>)] {
        &self.controls
    }

    /// Contribution series of one channel.
    pub fn channel(&self, name: &str) -> Option<&[f64]> {
        self.channels
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Contribution series of one control flag.
    pub fn control(&self, name: &str) -> Option<&[f64]> {
        self.controls
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Worst per-observation disagreement between `predicted` and direct
    /// model predictions. Relative to the prediction magnitude, absolute
    /// when that magnitude is below 1.
    ///
    /// Returns infinity when the lengths differ or either side holds a
    /// non-finite value.
    pub fn max_relative_error(&self, predictions: &[f64]) -> f64 {
        if predictions.len() != self.predicted.len() {
            return f64::INFINITY;
        }
        self.predicted
            .iter()
            .zip(predictions)
            .map(|(a, p)| {
                if a.is_finite() && p.is_finite() {
                    (a - p).abs() / p.abs().max(1.0)
                } else {
                    f64::INFINITY
                }
            })
            .fold(0.0, f64::max)
    }

    /// Flat row view for export.
    pub fn rows(&self) -> Vec<DecompositionRow> {
        let components = self.components();
        (0..self.len())
            .map(|i| DecompositionRow {
                week: self.weeks[i],
                components: components
                    .iter()
                    .map(|c| (c.name.to_string(), c.values[i]))
                    .collect(),
                predicted: self.predicted[i],
            })
            .collect()
    }
}

/// Total contribution of one channel over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelContribution {
    pub channel: String,
    pub contribution: f64,
    /// Fraction of total predicted sales
    pub share: f64,
}

/// Window-level totals computed from a [`Decomposition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionSummary {
    pub total_sales: f64,
    pub base: f64,
    pub base_share: f64,
    pub seasonality: f64,
    pub controls: Vec<(String, f64)>,
    pub channels: Vec<ChannelContribution>,
}

impl ContributionSummary {
    /// Sum every component over the window. Shares are NaN when total
    /// predicted sales is zero.
    pub fn from_decomposition(decomposition: &Decomposition) -> Self {
        let total_sales: f64 = decomposition.predicted().iter().sum();
        let share = |value: f64| {
            if total_sales == 0.0 {
                f64::NAN
            } else {
                value / total_sales
            }
        };

        let base: f64 = decomposition.base().iter().sum();
        let channels = decomposition
            .channels()
            .iter()
            .map(|(name, values)| {
                let contribution: f64 = values.iter().sum();
                ChannelContribution {
                    channel: name.clone(),
                    contribution,
                    share: share(contribution),
                }
            })
            .collect();
        let controls = decomposition
            .controls()
            .iter()
            .map(|(name, values)| (name.clone(), values.iter().sum()))
            .collect();

        Self {
            total_sales,
            base,
            base_share: share(base),
            seasonality: decomposition.seasonality().iter().sum(),
            controls,
            channels,
        }
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelContribution> {
        self.channels.iter().find(|c| c.channel == name)
    }

    /// Sum of all component totals; equals `total_sales` up to rounding.
    pub fn components_total(&self) -> f64 {
        self.base
            + self.seasonality
            + self.channels.iter().map(|c| c.contribution).sum::<f64>()
            + self.controls.iter().map(|(_, v)| v).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Decomposition {
        Decomposition::new(
            vec![0, 1],
            vec![100.0, 100.0],
            vec![
                ("meta".to_string(), vec![20.0, 30.0]),
                ("google".to_string(), vec![10.0, 0.0]),
            ],
            vec![-5.0, 5.0],
            vec![("promo".to_string(), vec![0.0, 15.0])],
        )
        .unwrap()
    }

    #[test]
    fn test_predicted_is_sum_of_components() {
        let d = sample();
        assert_eq!(d.predicted(), &[125.0, 150.0]);
    }

    #[test]
    fn test_components_order_and_kinds() {
        let d = sample();
        let kinds: Vec<_> = d.components().iter().map(|c| (c.name, c.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("base", ComponentKind::Base),
                ("meta", ComponentKind::Channel),
                ("google", ComponentKind::Channel),
                ("seasonality", ComponentKind::Seasonality),
                ("promo", ComponentKind::Control),
            ]
        );
    }

    #[test]
    fn test_rejects_ragged_components() {
        let result = Decomposition::new(
            vec![0, 1],
            vec![1.0, 1.0],
            vec![("meta".to_string(), vec![1.0])],
            vec![0.0, 0.0],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_max_relative_error() {
        let d = sample();
        assert_eq!(d.max_relative_error(&[125.0, 150.0]), 0.0);
        let err = d.max_relative_error(&[125.0, 151.5]);
        assert!((err - 1.5 / 151.5).abs() < 1e-12);
        assert!(d.max_relative_error(&[1.0]).is_infinite());
    }

    #[test]
    fn test_max_relative_error_flags_non_finite() {
        let d = sample();
        assert!(d.max_relative_error(&[125.0, f64::NAN]).is_infinite());
        assert!(d.max_relative_error(&[f64::INFINITY, 150.0]).is_infinite());

        let broken = Decomposition::new(
            vec![0],
            vec![1.0],
            vec![("meta".to_string(), vec![f64::NAN])],
            vec![0.0],
            vec![],
        )
        .unwrap();
        assert!(broken.max_relative_error(&[1.0]).is_infinite());
    }

    #[test]
    fn test_rows() {
        let rows = sample().rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].week, 1);
        assert_eq!(rows[1].predicted, 150.0);
        assert_eq!(rows[1].components[4], ("promo".to_string(), 15.0));
    }

    #[test]
    fn test_summary_totals() {
        let summary = ContributionSummary::from_decomposition(&sample());
        assert_eq!(summary.total_sales, 275.0);
        assert_eq!(summary.base, 200.0);
        assert!((summary.base_share - 200.0 / 275.0).abs() < 1e-12);
        assert_eq!(summary.seasonality, 0.0);
        assert_eq!(summary.channel("meta").unwrap().contribution, 50.0);
        assert_eq!(summary.controls, vec![("promo".to_string(), 15.0)]);
        assert!((summary.components_total() - summary.total_sales).abs() < 1e-9);
    }

    #[test]
    fn test_summary_zero_total_shares_are_nan() {
        let d = Decomposition::new(vec![0], vec![0.0], vec![], vec![0.0], vec![]).unwrap();
        let summary = ContributionSummary::from_decomposition(&d);
        assert!(summary.base_share.is_nan());
    }
}
