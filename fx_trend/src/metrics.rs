//! Summary statistics of a rate series

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative direction of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Classify from the current value and the 7- and 14-period averages.
    ///
    /// Up needs `current > ma7 > ma14`, down needs `current < ma7 < ma14`;
    /// ties and mixed signals are stable.
    pub fn classify(current: f64, ma7: f64, ma14: f64) -> Self {
        if current > ma7 && ma7 > ma14 {
            Trend::Up
        } else if current < ma7 && ma7 < ma14 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Trailing moving averages reported with the metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub ma7: f64,
    pub ma14: f64,
    pub ma30: f64,
}

/// Snapshot of a series' statistics, every number rounded to cents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendMetrics {
    /// Last observed rate
    pub current: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation of the rates
    pub volatility: f64,
    pub trend: Trend,
    /// Percent change from the second-to-last to the last rate
    pub change_percent: f64,
    pub moving_averages: MovingAverages,
}
