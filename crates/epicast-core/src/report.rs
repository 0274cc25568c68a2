//! Report assembly and the narrator capability
//!
//! The final pipeline stage: compose the numeric results into a prompt,
//! make exactly one call to the injected [`Narrator`] capability, and
//! split its free-text answer into a recommendation/explanation pair.

use crate::error::{EpiError, Result};
use crate::risk::RiskTier;
use crate::series::CaseSeries;
use crate::smoothing::ForecastResult;
use crate::trend::TrendLabel;
use serde::Serialize;

/// External text-generation capability
///
/// A single blocking round trip with no retry policy. Implementations
/// map their transport failures into [`EpiError::Narration`]. Injected
/// into [`assemble`] so tests can substitute a deterministic double.
pub trait Narrator {
    /// Generate free text for the given prompt
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Narrator double returning a fixed response
///
/// Used by tests and by callers that want canned narration.
#[derive(Debug, Clone)]
pub struct StaticNarrator {
    response: String,
}

impl StaticNarrator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Narrator for StaticNarrator {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }
}

/// Terminal report artifact, never mutated after assembly
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// The validated input series
    pub series: CaseSeries,
    /// Point forecast with confidence bounds
    pub forecast: ForecastResult,
    /// Outbreak risk tier from recent observations
    pub risk: RiskTier,
    /// Forecast direction relative to history
    pub trend: TrendLabel,
    /// First line of the narrator response
    pub recommendation: String,
    /// Remainder of the narrator response
    pub explanation: String,
}

/// Build the deterministic narrator prompt
///
/// Embeds the full history, the forecast rounded to whole cases, the
/// trend label, and the risk tier, followed by a fixed three-part
/// instruction.
pub fn build_prompt(
    series: &CaseSeries,
    forecast: &ForecastResult,
    risk: RiskTier,
    trend: TrendLabel,
) -> String {
    let history = join_numbers(series.values());
    let predicted = forecast
        .rounded()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are an AI epidemiologist.\n\
         Given the epidemic case history: [{history}]\n\
         Forecasted next {horizon} case numbers: [{predicted}]\n\
         Trend: {trend}\n\
         Current Risk Level: {risk}\n\
         \n\
         Provide:\n\
         1. Recommended interventions to control spread.\n\
         2. Policy guidance for government/public health authorities.\n\
         3. Short explanation why these actions are suitable.\n",
        horizon = forecast.len(),
    )
}

/// Assemble the final report, invoking the narrator exactly once
///
/// Fails with [`EpiError::Narration`] when the capability errors or
/// returns no text; the failure is terminal for this request and no
/// partial report is emitted.
///
/// Response split quirk (kept for compatibility): the first line
/// becomes the recommendation; the remainder, if any, becomes the
/// explanation; a response with no second line has the *full* raw text
/// as its explanation.
pub fn assemble(
    series: &CaseSeries,
    forecast: ForecastResult,
    risk: RiskTier,
    trend: TrendLabel,
    narrator: &dyn Narrator,
) -> Result<Report> {
    let prompt = build_prompt(series, &forecast, risk, trend);
    let raw = narrator.generate(&prompt)?;

    if raw.trim().is_empty() {
        return Err(EpiError::Narration(
            "narrator returned an empty response".to_string(),
        ));
    }

    let (recommendation, explanation) = split_response(&raw);

    Ok(Report {
        series: series.clone(),
        forecast,
        risk,
        trend,
        recommendation,
        explanation,
    })
}

/// First line vs. rest, with the full-text fallback for one-line answers
fn split_response(raw: &str) -> (String, String) {
    match raw.split_once('\n') {
        Some((first, rest)) => (first.trim().to_string(), rest.trim().to_string()),
        None => (raw.trim().to_string(), raw.to_string()),
    }
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
