//! Outbreak risk classification
//!
//! Maps recent observed case volume to a discrete risk tier. Thresholds
//! are named constants so behavior stays identical while tests can
//! override them through [`RiskThresholds`].

use crate::series::CaseSeries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recent-mean threshold above which risk is Medium
pub const MEDIUM_THRESHOLD: f64 = 500.0;

/// Recent-mean threshold above which risk is High
pub const HIGH_THRESHOLD: f64 = 1000.0;

/// Number of trailing observations averaged for classification
pub const RECENT_WINDOW: usize = 3;

/// Discrete outbreak risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Medium => write!(f, "Medium"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

/// Classification thresholds and averaging window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Recent mean above this is at least Medium (strictly greater)
    pub medium: f64,
    /// Recent mean above this is High (strictly greater)
    pub high: f64,
    /// Trailing window averaged over
    pub window: usize,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: MEDIUM_THRESHOLD,
            high: HIGH_THRESHOLD,
            window: RECENT_WINDOW,
        }
    }
}

/// Classify outbreak risk from the mean of the most recent observations
///
/// The boundary policy is strict-above: a mean of exactly
/// [`MEDIUM_THRESHOLD`] is Low, exactly [`HIGH_THRESHOLD`] is Medium.
/// When the series is shorter than the window, all observations are
/// averaged (upstream validation guarantees a non-empty series).
pub fn classify(series: &CaseSeries, thresholds: &RiskThresholds) -> RiskTier {
    let recent = series.recent_mean(thresholds.window);
    if recent > thresholds.high {
        RiskTier::High
    } else if recent > thresholds.medium {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}
