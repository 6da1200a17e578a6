use std::time::Duration;

use thiserror::Error;

/// User-facing message for a blank recipe description.
pub const MSG_DESCRIPTION_REQUIRED: &str = "Recipe description is required";
/// User-facing message when no backend credential can be found.
pub const MSG_API_KEY_MISSING: &str = "API key is not configured";
/// User-facing message when the model reply could not be turned into a record.
pub const MSG_PARSE_FAILED: &str = "Failed to parse nutritional data from AI response";
/// User-facing message for every other failure.
pub const MSG_ANALYSIS_FAILED: &str = "Failed to analyze recipe. Please try again.";

/// Errors that can occur while analyzing a recipe
///
/// The raw model text carried by `Extraction` and `Validation` is kept for
/// operator logs only; it is never part of the `Display` output.
#[derive(Error, Debug)]
pub enum NutritionError {
    /// The recipe description (or another caller input) was rejected
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No usable backend could be configured, usually a missing API key
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failed to load configuration from file or environment
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// The model backend call failed
    #[error("Model backend error: {0}")]
    Upstream(String),

    /// The model backend did not answer within the wall-clock ceiling
    #[error("Model backend timed out after {0:?}")]
    Timeout(Duration),

    /// No parseable JSON could be recovered from the model reply
    #[error("Failed to parse JSON from model response: {source}")]
    Extraction {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// The recovered JSON does not describe a nutrition record
    #[error("Model response is not a valid nutrition record: {reason}")]
    Validation { raw: String, reason: String },

    /// Profile values outside the accepted ranges
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

impl NutritionError {
    /// HTTP-equivalent status code for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            NutritionError::InvalidInput(_) | NutritionError::InvalidProfile(_) => 400,
            _ => 500,
        }
    }

    /// Message safe to hand back to the caller
    pub fn public_message(&self) -> &'static str {
        match self {
            NutritionError::InvalidInput(_) => MSG_DESCRIPTION_REQUIRED,
            NutritionError::Configuration(_) | NutritionError::Config(_) => MSG_API_KEY_MISSING,
            NutritionError::Extraction { .. } | NutritionError::Validation { .. } => {
                MSG_PARSE_FAILED
            }
            _ => MSG_ANALYSIS_FAILED,
        }
    }

    /// Raw model text attached to extraction and validation failures
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            NutritionError::Extraction { raw, .. } | NutritionError::Validation { raw, .. } => {
                Some(raw)
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NutritionError {
    fn from(err: reqwest::Error) -> Self {
        NutritionError::Upstream(err.to_string())
    }
}
