//! # epicast-narrate
//!
//! HTTP-backed [`Narrator`] implementations for epicast reports.
//!
//! The default backend is the Gemini Generative Language API, consumed
//! as a single blocking round trip per report with no retry policy.
//! Transport, decoding, and empty-candidate failures all surface as
//! [`EpiError::Narration`] so the pipeline never fabricates text.
//!
//! # Example
//!
//! ```rust,no_run
//! use epicast_narrate::{GeminiConfig, GeminiNarrator};
//! use epicast_core::report::Narrator;
//!
//! let config = GeminiConfig::new("my-api-key");
//! let narrator = GeminiNarrator::new(config);
//! let text = narrator.generate("Summarize the outbreak.").unwrap();
//! println!("{text}");
//! ```

use epicast_core::error::EpiError;
use epicast_core::report::Narrator;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default Gemini model used for narration
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Errors from the narrator backend
#[derive(Error, Debug)]
pub enum NarrateError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    Request(String),

    /// Failed to decode the response body
    #[error("Decode error: {0}")]
    Decode(String),

    /// API answered with an error payload
    #[error("API error [{code}]: {message}")]
    Api { code: i64, message: String },

    /// Response carried no usable text
    #[error("No text in response")]
    Empty,
}

impl From<NarrateError> for EpiError {
    fn from(err: NarrateError) -> Self {
        EpiError::Narration(err.to_string())
    }
}

/// Configuration for the Gemini narrator
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, passed as a query parameter
    pub api_key: String,
    /// Model name, e.g. `gemini-1.5-flash`
    pub model: String,
    /// API base URL (overridable for tests)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Configuration with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

// Wire structures for the generateContent endpoint

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}

/// Gemini-backed narrator
///
/// One blocking request per call; the caller owns any retry policy.
#[derive(Debug, Clone)]
pub struct GeminiNarrator {
    config: GeminiConfig,
}

impl GeminiNarrator {
    /// Create a narrator for the given configuration
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        )
    }

    fn request_body(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }

    /// Send the prompt and return the generated text
    pub fn generate_blocking(&self, prompt: &str) -> Result<String, NarrateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| NarrateError::Request(e.to_string()))?;

        let response = client
            .post(self.endpoint())
            .json(&Self::request_body(prompt))
            .send()
            .map_err(|e| NarrateError::Request(e.to_string()))?;

        let body = response
            .text()
            .map_err(|e| NarrateError::Request(e.to_string()))?;

        parse_response(&body)
    }
}

impl Narrator for GeminiNarrator {
    fn generate(&self, prompt: &str) -> epicast_core::Result<String> {
        Ok(self.generate_blocking(prompt)?)
    }
}

/// Extract the generated text from a generateContent response body
fn parse_response(body: &str) -> Result<String, NarrateError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| NarrateError::Decode(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(NarrateError::Api {
            code: error.code,
            message: error.message,
        });
    }

    let candidates = response.candidates.ok_or(NarrateError::Empty)?;
    let content = candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or(NarrateError::Empty)?;

    let text = content
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(NarrateError::Empty);
    }

    Ok(text)
}
