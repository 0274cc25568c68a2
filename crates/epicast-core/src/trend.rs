//! Trend direction labeling
//!
//! Compares the forecast mean against the historical mean to produce a
//! binary direction label. There is deliberately no "flat" state: an
//! equal mean resolves to [`TrendLabel::Decreasing`].

use crate::series::CaseSeries;
use crate::smoothing::ForecastResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary trend direction of the forecast relative to history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendLabel {
    Increasing,
    Decreasing,
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendLabel::Increasing => write!(f, "increasing"),
            TrendLabel::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// Label the trend by comparing forecast mean to historical mean
pub fn analyze(series: &CaseSeries, forecast: &ForecastResult) -> TrendLabel {
    if forecast.mean() > series.mean() {
        TrendLabel::Increasing
    } else {
        TrendLabel::Decreasing
    }
}
