//! End-to-end pipeline tests with a mock narrator

use epicast_core::prelude::*;
use std::cell::Cell;

struct RecordingNarrator {
    calls: Cell<usize>,
    last_prompt: Cell<Option<String>>,
    response: String,
}

impl RecordingNarrator {
    fn new(response: &str) -> Self {
        Self {
            calls: Cell::new(0),
            last_prompt: Cell::new(None),
            response: response.to_string(),
        }
    }
}

impl Narrator for RecordingNarrator {
    fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.last_prompt.set(Some(prompt.to_string()));
        Ok(self.response.clone())
    }
}

#[test]
fn increasing_series_end_to_end() {
    let series = CaseSeries::parse_list("10,12,15,20,25,30,40").unwrap();
    let narrator = RecordingNarrator::new(
        "Ramp up community testing and isolation.\nThe forecast shows sustained growth.",
    );

    let report = pipeline::run(&series, &PipelineConfig::default(), &narrator).unwrap();

    assert_eq!(report.forecast.values.len(), 5);
    assert_eq!(report.trend, TrendLabel::Increasing);
    assert_eq!(report.risk, RiskTier::Low);
    assert!(!report.recommendation.is_empty());
    assert!(!report.explanation.is_empty());
    assert_eq!(narrator.calls.get(), 1);

    let prompt = narrator.last_prompt.take().unwrap();
    assert!(prompt.contains("10, 12, 15, 20, 25, 30, 40"));
    assert!(prompt.contains("increasing"));
    assert!(prompt.contains("Low"));
}

#[test]
fn single_line_narration_uses_full_text_as_explanation() {
    let series = CaseSeries::parse_list("100,90,80,70,60,50").unwrap();
    let narrator = RecordingNarrator::new("Maintain current surveillance.");

    let report = pipeline::run(&series, &PipelineConfig::default(), &narrator).unwrap();

    assert_eq!(report.recommendation, "Maintain current surveillance.");
    assert_eq!(report.explanation, "Maintain current surveillance.");
    assert_eq!(report.trend, TrendLabel::Decreasing);
}

#[test]
fn validation_failure_reports_before_any_modeling() {
    let err = CaseSeries::parse_list("1,2,3,4").unwrap_err();
    assert_eq!(
        err,
        EpiError::InsufficientData {
            required: 5,
            actual: 4,
        }
    );

    let err = CaseSeries::parse_list("1,2,x,4,5").unwrap_err();
    assert!(matches!(err, EpiError::Parse { .. }));
}

#[test]
fn assessment_survives_narration_failure() {
    struct DownNarrator;
    impl Narrator for DownNarrator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Err(EpiError::Narration("timeout".to_string()))
        }
    }

    let series = CaseSeries::parse_list("500,700,900,1200,1500,1800").unwrap();
    let config = PipelineConfig::default();

    // Numeric stages first: these results are not lost
    let assessment = pipeline::assess(&series, &config).unwrap();
    assert_eq!(assessment.risk, RiskTier::High);
    assert_eq!(assessment.trend, TrendLabel::Increasing);

    // Narration then fails terminally with no fabricated text
    let err = pipeline::run(&series, &config, &DownNarrator).unwrap_err();
    assert_eq!(err, EpiError::Narration("timeout".to_string()));
}

#[test]
fn forecasts_are_deterministic_across_runs() {
    let series = CaseSeries::parse_list("120,130,128,150,170,165,190").unwrap();
    let config = PipelineConfig::default();
    let a = pipeline::assess(&series, &config).unwrap();
    let b = pipeline::assess(&series, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn report_serializes_for_rendering() {
    let series = CaseSeries::parse_list("10,12,15,20,25").unwrap();
    let narrator = RecordingNarrator::new("Keep monitoring.\nThe tail is flat.");
    let report = pipeline::run(&series, &PipelineConfig::default(), &narrator).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"recommendation\""));
    assert!(json.contains("\"forecast\""));
}
