//! Additive-trend exponential smoothing (Holt's linear method)
//!
//! Holt's method extends simple exponential smoothing with a trend
//! component, which makes it a good default for short, noisy epidemic
//! series: no seasonal period to configure, and a deterministic fit.
//!
//! ## Parameters
//!
//! - `alpha` (level): higher values = more responsive to recent changes
//! - `beta` (trend): controls trend smoothing
//!
//! [`HoltSmoothing::fit_auto`] selects both by a fixed-order grid search
//! minimizing one-step-ahead squared error, so identical input always
//! yields identical parameters and forecasts.

use crate::error::{EpiError, Result};
use crate::series::CaseSeries;
use serde::{Deserialize, Serialize};

/// Default forecast horizon (number of future steps)
pub const DEFAULT_HORIZON: usize = 5;

/// Confidence level used for forecast intervals
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Grid step for automatic parameter selection
const GRID_STEP: usize = 5;

/// Point forecast with residual-based confidence bounds
///
/// Exactly `horizon` values for the steps immediately following the last
/// observation, paired with lower/upper bounds per step. Produced once
/// per forecast request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Point forecasts, nearest step first
    pub values: Vec<f64>,
    /// Lower confidence bound per step
    pub lower: Vec<f64>,
    /// Upper confidence bound per step
    pub upper: Vec<f64>,
    /// Confidence level of the bounds (e.g. 0.95)
    pub confidence_level: f64,
}

impl ForecastResult {
    /// Arithmetic mean of the point forecasts
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Point forecasts rounded to whole cases, for display and prompts
    pub fn rounded(&self) -> Vec<i64> {
        self.values.iter().map(|v| v.round() as i64).collect()
    }

    /// Number of forecast steps
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the forecast is empty (never true for a valid horizon)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Holt's linear trend model for case count forecasting
///
/// # Example
///
/// ```rust
/// use epicast_core::series::CaseSeries;
/// use epicast_core::smoothing::HoltSmoothing;
///
/// let series = CaseSeries::from_values(vec![10.0, 12.0, 15.0, 20.0, 25.0, 30.0, 40.0]).unwrap();
/// let model = HoltSmoothing::fit_auto(&series).unwrap();
/// let forecast = model.forecast(5).unwrap();
/// assert_eq!(forecast.values.len(), 5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoltSmoothing {
    /// Level smoothing parameter
    alpha: f64,
    /// Trend smoothing parameter
    beta: f64,
    /// Current level
    level: f64,
    /// Current trend
    trend: f64,
    /// One-step-ahead residuals from fitting
    residuals: Vec<f64>,
    /// Whether the model has been fitted
    fitted: bool,
}

impl HoltSmoothing {
    /// Create a new unfitted model
    ///
    /// # Arguments
    ///
    /// * `alpha` - Level smoothing (0 < alpha < 1)
    /// * `beta` - Trend smoothing (0 < beta < 1)
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if !(0.0 < alpha && alpha < 1.0) {
            return Err(EpiError::InvalidParameter {
                name: "alpha".to_string(),
                reason: "must be between 0 and 1 (exclusive)".to_string(),
            });
        }
        if !(0.0 < beta && beta < 1.0) {
            return Err(EpiError::InvalidParameter {
                name: "beta".to_string(),
                reason: "must be between 0 and 1 (exclusive)".to_string(),
            });
        }

        Ok(Self {
            alpha,
            beta,
            level: 0.0,
            trend: 0.0,
            residuals: Vec::new(),
            fitted: false,
        })
    }

    /// Fit the model to a validated series
    ///
    /// Fails with [`EpiError::ModelFit`] on a degenerate series (zero
    /// variance gives the smoother nothing to fit). A monotone ramp is
    /// not degenerate: its trend component is exact and extrapolation
    /// continues the slope.
    pub fn fit(&mut self, series: &CaseSeries) -> Result<()> {
        let data = series.values();

        if is_constant(data) {
            return Err(EpiError::ModelFit {
                reason: "series has zero variance (all observations equal)".to_string(),
            });
        }

        // Initialize level and trend from the first two observations
        self.level = data[0];
        self.trend = data[1] - data[0];
        self.residuals = Vec::with_capacity(data.len() - 1);

        for &value in &data[1..] {
            let predicted = self.level + self.trend;
            self.residuals.push(value - predicted);

            let prev_level = self.level;
            self.level = self.alpha * value + (1.0 - self.alpha) * (self.level + self.trend);
            self.trend = self.beta * (self.level - prev_level) + (1.0 - self.beta) * self.trend;
        }

        self.fitted = true;
        Ok(())
    }

    /// Fit with automatic (alpha, beta) selection via grid search
    ///
    /// Scans alpha and beta over {0.05, 0.10, ..., 0.95} in fixed order
    /// and keeps the pair with the smallest one-step-ahead SSE. Ties go
    /// to the earliest pair scanned, so selection is deterministic.
    pub fn fit_auto(series: &CaseSeries) -> Result<Self> {
        let data = series.values();

        if is_constant(data) {
            return Err(EpiError::ModelFit {
                reason: "series has zero variance (all observations equal)".to_string(),
            });
        }

        let mut best_alpha = 0.0;
        let mut best_beta = 0.0;
        let mut best_sse = f64::INFINITY;

        for alpha_pct in (GRID_STEP..100).step_by(GRID_STEP) {
            for beta_pct in (GRID_STEP..100).step_by(GRID_STEP) {
                let alpha = alpha_pct as f64 / 100.0;
                let beta = beta_pct as f64 / 100.0;
                let sse = one_step_sse(data, alpha, beta);
                if sse < best_sse {
                    best_sse = sse;
                    best_alpha = alpha;
                    best_beta = beta;
                }
            }
        }

        if !best_sse.is_finite() {
            return Err(EpiError::ModelFit {
                reason: "parameter search did not converge".to_string(),
            });
        }

        let mut model = Self::new(best_alpha, best_beta)?;
        model.fit(series)?;
        Ok(model)
    }

    /// Forecast `horizon` steps past the last observation
    pub fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        if !self.fitted {
            return Err(EpiError::ModelFit {
                reason: "model must be fitted before forecasting".to_string(),
            });
        }
        if horizon == 0 {
            return Err(EpiError::InvalidParameter {
                name: "horizon".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let mut values = Vec::with_capacity(horizon);
        for h in 1..=horizon {
            values.push(self.level + h as f64 * self.trend);
        }

        // Residual std with a horizon-widening standard error
        let std_dev = residual_std(&self.residuals);
        let z = z_score(CONFIDENCE_LEVEL);

        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (h, &value) in values.iter().enumerate() {
            let se = std_dev * ((h + 1) as f64).sqrt();
            lower.push(value - z * se);
            upper.push(value + z * se);
        }

        Ok(ForecastResult {
            values,
            lower,
            upper,
            confidence_level: CONFIDENCE_LEVEL,
        })
    }

    /// Current (level, trend) components
    pub fn components(&self) -> (f64, f64) {
        (self.level, self.trend)
    }

    /// Selected (alpha, beta) parameters
    pub fn parameters(&self) -> (f64, f64) {
        (self.alpha, self.beta)
    }

    /// Whether the model has been fitted
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }
}

/// One-step-ahead sum of squared errors for a candidate (alpha, beta)
fn one_step_sse(data: &[f64], alpha: f64, beta: f64) -> f64 {
    let mut level = data[0];
    let mut trend = data[1] - data[0];
    let mut sse = 0.0;

    for &value in &data[1..] {
        let predicted = level + trend;
        let error = value - predicted;
        sse += error * error;

        let prev_level = level;
        level = alpha * value + (1.0 - alpha) * (level + trend);
        trend = beta * (level - prev_level) + (1.0 - beta) * trend;
    }

    sse
}

fn is_constant(data: &[f64]) -> bool {
    let first = data[0];
    data.iter().all(|&v| (v - first).abs() < 1e-12)
}

fn residual_std(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    let n = residuals.len() as f64;
    let mean = residuals.iter().sum::<f64>() / n;
    let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Z-score for a confidence level (table lookup, 1.96 fallback)
fn z_score(confidence_level: f64) -> f64 {
    if (confidence_level - 0.90).abs() < 1e-9 {
        1.645
    } else if (confidence_level - 0.99).abs() < 1e-9 {
        2.576
    } else {
        1.96
    }
}
