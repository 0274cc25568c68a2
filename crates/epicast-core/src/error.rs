//! Error types for the forecasting pipeline
//!
//! Defines the standardized error type shared by every pipeline stage.
//! All variants are terminal for the current report request: nothing is
//! retried internally, callers retry a whole request if they want to.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, EpiError>;

/// Errors that can occur while producing an epidemic report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EpiError {
    /// A raw input token could not be parsed as a finite number
    #[error("Malformed case count '{token}' at position {position}")]
    Parse { token: String, position: usize },

    /// Series is too short for the forecasting model
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model fitting failed (degenerate series or non-convergence)
    #[error("Model fit failed: {reason}")]
    ModelFit { reason: String },

    /// Narrator capability unavailable or returned no text
    #[error("Narration failed: {0}")]
    Narration(String),
}
