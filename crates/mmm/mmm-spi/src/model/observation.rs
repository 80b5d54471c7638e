//! Weekly observation record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One time period of marketing data.
///
/// `spend` holds every field tagged as spend, keyed by channel name.
/// `events` holds binary event flags such as `promo` or `competitor_launch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Zero-based period index
    pub week: usize,
    /// Calendar date of the period
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Spend per channel
    #[serde(default)]
    pub spend: BTreeMap<String, f64>,
    /// Binary event flags
    #[serde(default)]
    pub events: BTreeMap<String, bool>,
    /// Target value
    pub sales: f64,
}

impl Observation {
    /// Create an observation with no spend and no events.
    pub fn new(week: usize, sales: f64) -> Self {
        Self {
            week,
            date: None,
            spend: BTreeMap::new(),
            events: BTreeMap::new(),
            sales,
        }
    }

    /// Set the calendar date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Add spend for a channel.
    pub fn with_spend(mut self, channel: impl Into<String>, amount: f64) -> Self {
        self.spend.insert(channel.into(), amount);
        self
    }

    /// Add an event flag.
    pub fn with_event(mut self, flag: impl Into<String>, active: bool) -> Self {
        self.events.insert(flag.into(), active);
        self
    }

    /// Spend for a channel, if the channel is part of this record.
    pub fn spend_for(&self, channel: &str) -> Option<f64> {
        self.spend.get(channel).copied()
    }

    /// Channel names carried by this record, in sorted order.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.spend.keys().map(String::as_str)
    }
}

/// Extract the sales series from a window of observations.
pub fn sales(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|o| o.sales).collect()
}
