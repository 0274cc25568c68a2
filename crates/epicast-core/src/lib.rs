//! # epicast-core
//!
//! Short-horizon epidemic case forecasting with risk classification and
//! narrated reporting.
//!
//! The pipeline takes a short univariate series of case counts, fits an
//! additive-trend exponential smoothing model, labels the forecast
//! direction, classifies current outbreak risk from recent volume, and
//! assembles a report whose free-text recommendation comes from an
//! injected [`report::Narrator`] capability.
//!
//! ## Example
//!
//! ```rust
//! use epicast_core::prelude::*;
//!
//! let series = CaseSeries::parse_list("10, 12, 15, 20, 25, 30, 40").unwrap();
//! let narrator = StaticNarrator::new("Scale up testing.\nCases are climbing.");
//! let report = pipeline::run(&series, &PipelineConfig::default(), &narrator).unwrap();
//!
//! assert_eq!(report.forecast.values.len(), 5);
//! assert_eq!(report.trend, TrendLabel::Increasing);
//! assert_eq!(report.risk, RiskTier::Low);
//! ```

pub mod error;
pub mod pipeline;
pub mod report;
pub mod risk;
pub mod series;
pub mod smoothing;
pub mod trend;

pub use error::{EpiError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{EpiError, Result};
    pub use crate::pipeline::{self, Assessment, PipelineConfig};
    pub use crate::report::{Narrator, Report, StaticNarrator};
    pub use crate::risk::{RiskThresholds, RiskTier};
    pub use crate::series::CaseSeries;
    pub use crate::smoothing::{ForecastResult, HoltSmoothing, DEFAULT_HORIZON};
    pub use crate::trend::TrendLabel;
}
