//! End-to-end forecasting pipeline
//!
//! Wires the stages together: validated series in, numeric assessment
//! out, and optionally a narrated [`Report`]. Each invocation operates
//! on its own series and holds no cross-call state, so concurrent
//! requests need no coordination.

use crate::error::Result;
use crate::report::{self, Narrator, Report};
use crate::risk::{self, RiskThresholds, RiskTier};
use crate::series::CaseSeries;
use crate::smoothing::{ForecastResult, HoltSmoothing, DEFAULT_HORIZON};
use crate::trend::{self, TrendLabel};
use serde::{Deserialize, Serialize};

/// Fixed configuration for a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of future steps to forecast
    pub horizon: usize,
    /// Risk tier boundaries
    pub thresholds: RiskThresholds,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            thresholds: RiskThresholds::default(),
        }
    }
}

/// Numeric pipeline output before narration
///
/// Computed before the narrator is contacted, so a narration failure
/// never loses the forecast, risk tier, or trend label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub forecast: ForecastResult,
    pub risk: RiskTier,
    pub trend: TrendLabel,
}

/// Run the numeric stages: fit, forecast, classify, label
pub fn assess(series: &CaseSeries, config: &PipelineConfig) -> Result<Assessment> {
    let model = HoltSmoothing::fit_auto(series)?;
    let forecast = model.forecast(config.horizon)?;
    let risk = risk::classify(series, &config.thresholds);
    let trend = trend::analyze(series, &forecast);

    Ok(Assessment {
        forecast,
        risk,
        trend,
    })
}

/// Run the full pipeline including narration
pub fn run(
    series: &CaseSeries,
    config: &PipelineConfig,
    narrator: &dyn Narrator,
) -> Result<Report> {
    let assessment = assess(series, config)?;
    report::assemble(
        series,
        assessment.forecast,
        assessment.risk,
        assessment.trend,
        narrator,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EpiError;
    use crate::report::StaticNarrator;

    #[test]
    fn test_assess_produces_all_numeric_outputs() {
        let series =
            CaseSeries::from_values(vec![10.0, 12.0, 15.0, 20.0, 25.0, 30.0, 40.0]).unwrap();
        let assessment = assess(&series, &PipelineConfig::default()).unwrap();

        assert_eq!(assessment.forecast.values.len(), DEFAULT_HORIZON);
        assert_eq!(assessment.risk, RiskTier::Low);
        assert_eq!(assessment.trend, TrendLabel::Increasing);
    }

    #[test]
    fn test_run_stops_before_narration_on_model_failure() {
        struct PanickingNarrator;
        impl Narrator for PanickingNarrator {
            fn generate(&self, _prompt: &str) -> Result<String> {
                panic!("narrator must not be contacted when the model fails");
            }
        }

        let series = CaseSeries::from_values(vec![5.0, 5.0, 5.0, 5.0, 5.0]).unwrap();
        let err = run(&series, &PipelineConfig::default(), &PanickingNarrator).unwrap_err();
        assert!(matches!(err, EpiError::ModelFit { .. }));
    }

    #[test]
    fn test_run_produces_complete_report() {
        let series =
            CaseSeries::from_values(vec![200.0, 300.0, 450.0, 600.0, 800.0, 1100.0]).unwrap();
        let narrator = StaticNarrator::new("Tighten contact tracing.\nGrowth is accelerating.");
        let report = run(&series, &PipelineConfig::default(), &narrator).unwrap();

        // last-3 mean = (600 + 800 + 1100) / 3 = 833.3
        assert_eq!(report.risk, RiskTier::Medium);
        assert_eq!(report.trend, TrendLabel::Increasing);
        assert_eq!(report.recommendation, "Tighten contact tracing.");
        assert_eq!(report.explanation, "Growth is accelerating.");
    }

    #[test]
    fn test_custom_horizon() {
        let series =
            CaseSeries::from_values(vec![10.0, 12.0, 15.0, 20.0, 25.0, 30.0, 40.0]).unwrap();
        let config = PipelineConfig {
            horizon: 3,
            ..Default::default()
        };
        let assessment = assess(&series, &config).unwrap();
        assert_eq!(assessment.forecast.values.len(), 3);
    }
}
