//! Validated epidemic case series
//!
//! A [`CaseSeries`] is the entry point of the pipeline: an ordered,
//! immutable sequence of finite case counts, one per time step. All
//! validation happens at construction, so downstream stages can assume
//! a well-formed series.

use crate::error::{EpiError, Result};
use serde::{Deserialize, Serialize};

/// Minimum number of observations required before forecasting is attempted
pub const MIN_OBSERVATIONS: usize = 5;

/// An ordered, validated series of epidemic case counts
///
/// Values are finite reals, implicitly equally spaced in time. The series
/// is constructed once and never mutated.
///
/// # Example
///
/// ```rust
/// use epicast_core::series::CaseSeries;
///
/// let series = CaseSeries::parse_list("10, 12, 15, 20, 25").unwrap();
/// assert_eq!(series.len(), 5);
/// assert!((series.mean() - 16.4).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSeries {
    values: Vec<f64>,
}

impl CaseSeries {
    /// Build a series from already-numeric values
    ///
    /// Fails with [`EpiError::Parse`] on any non-finite value and with
    /// [`EpiError::InsufficientData`] when fewer than
    /// [`MIN_OBSERVATIONS`] values are supplied.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        for (position, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(EpiError::Parse {
                    token: value.to_string(),
                    position,
                });
            }
        }

        if values.len() < MIN_OBSERVATIONS {
            return Err(EpiError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: values.len(),
            });
        }

        Ok(Self { values })
    }

    /// Parse a sequence of raw string tokens into a series
    ///
    /// The first malformed token fails the whole parse; order and values
    /// of well-formed input are preserved exactly.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut values = Vec::with_capacity(tokens.len());
        for (position, token) in tokens.iter().enumerate() {
            let raw = token.as_ref().trim();
            let value: f64 = raw.parse().map_err(|_| EpiError::Parse {
                token: raw.to_string(),
                position,
            })?;
            if !value.is_finite() {
                return Err(EpiError::Parse {
                    token: raw.to_string(),
                    position,
                });
            }
            values.push(value);
        }

        if values.len() < MIN_OBSERVATIONS {
            return Err(EpiError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: values.len(),
            });
        }

        Ok(Self { values })
    }

    /// Parse a comma-separated list, skipping empty tokens
    ///
    /// Mirrors the accepted command-line form: `"10, 12, 15, 20, 25"`.
    pub fn parse_list(raw: &str) -> Result<Self> {
        let tokens: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        Self::parse(&tokens)
    }

    /// The observed values, oldest first
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty (never true for a validated series)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean of all observations
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Mean of the last `window` observations
    ///
    /// Falls back to the full series when it is shorter than `window`.
    pub fn recent_mean(&self, window: usize) -> f64 {
        let start = self.values.len().saturating_sub(window);
        let tail = &self.values[start..];
        tail.iter().sum::<f64>() / tail.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order_and_values() {
        let series = CaseSeries::parse(&["10", "12.5", "15", "20", "25"]).unwrap();
        assert_eq!(series.values(), &[10.0, 12.5, 15.0, 20.0, 25.0]);
    }

    #[test]
    fn test_parse_rejects_malformed_token() {
        let err = CaseSeries::parse(&["10", "12", "abc", "20", "25"]).unwrap_err();
        assert_eq!(
            err,
            EpiError::Parse {
                token: "abc".to_string(),
                position: 2,
            }
        );
    }

    #[test]
    fn test_parse_rejects_non_finite_token() {
        let err = CaseSeries::parse(&["10", "inf", "15", "20", "25"]).unwrap_err();
        assert!(matches!(err, EpiError::Parse { position: 1, .. }));

        let err = CaseSeries::parse(&["NaN", "12", "15", "20", "25"]).unwrap_err();
        assert!(matches!(err, EpiError::Parse { position: 0, .. }));
    }

    #[test]
    fn test_short_series_is_insufficient() {
        for n in 0..MIN_OBSERVATIONS {
            let tokens: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            let err = CaseSeries::parse(&tokens).unwrap_err();
            assert_eq!(
                err,
                EpiError::InsufficientData {
                    required: MIN_OBSERVATIONS,
                    actual: n,
                }
            );
        }
    }

    #[test]
    fn test_exactly_minimum_length_succeeds() {
        let series = CaseSeries::parse(&["1", "2", "3", "4", "5"]).unwrap();
        assert_eq!(series.len(), 5);
    }

    #[test]
    fn test_from_values_rejects_nan() {
        let err = CaseSeries::from_values(vec![1.0, f64::NAN, 3.0, 4.0, 5.0]).unwrap_err();
        assert!(matches!(err, EpiError::Parse { position: 1, .. }));
    }

    #[test]
    fn test_parse_list_skips_empty_tokens() {
        let series = CaseSeries::parse_list("10, 12,, 15, 20, 25,").unwrap();
        assert_eq!(series.values(), &[10.0, 12.0, 15.0, 20.0, 25.0]);
    }

    #[test]
    fn test_mean() {
        let series = CaseSeries::from_values(vec![10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        assert!((series.mean() - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_recent_mean_last_three() {
        let series = CaseSeries::from_values(vec![100.0, 200.0, 300.0, 400.0, 1600.0]).unwrap();
        let mean = series.recent_mean(3);
        assert!((mean - (300.0 + 400.0 + 1600.0) / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_recent_mean_window_larger_than_series() {
        let series = CaseSeries::from_values(vec![10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        assert!((series.recent_mean(100) - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_negative_values_are_accepted() {
        // No domain enforcement beyond finiteness at this layer
        let series = CaseSeries::from_values(vec![-1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(series.values()[0], -1.0);
    }
}
