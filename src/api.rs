//! Request/response envelope for callers that speak JSON.
//!
//! The handler is transport agnostic: it takes the raw request body and
//! returns an HTTP-equivalent status with a JSON body, so any server or the
//! CLI can sit in front of it.

use log::error;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::description::RecipeDescription;
use crate::error::{NutritionError, MSG_ANALYSIS_FAILED, MSG_DESCRIPTION_REQUIRED};
use crate::model::NutritionReport;
use crate::pipeline::NutritionAnalyzer;

/// Body of an analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub recipe_description: String,
}

/// Status plus JSON body returned to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(report: &NutritionReport) -> Self {
        match serde_json::to_value(report) {
            Ok(body) => ApiResponse { status: 200, body },
            Err(e) => {
                error!("Failed to serialize nutrition report: {}", e);
                ApiResponse::error(500, MSG_ANALYSIS_FAILED)
            }
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        ApiResponse {
            status,
            body: json!({ "error": message }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<&NutritionError> for ApiResponse {
    fn from(err: &NutritionError) -> Self {
        ApiResponse::error(err.status_code(), err.public_message())
    }
}

impl From<Result<NutritionReport, NutritionError>> for ApiResponse {
    fn from(result: Result<NutritionReport, NutritionError>) -> Self {
        match result {
            Ok(report) => ApiResponse::ok(&report),
            Err(e) => ApiResponse::from(&e),
        }
    }
}

/// Handle a raw JSON request body of the form `{"recipeDescription": "..."}`
///
/// A body that is not JSON at all is an unexpected failure (500); a missing,
/// non-string or blank description is a caller error (400).
pub async fn handle_analyze(analyzer: &NutritionAnalyzer, body: &str) -> ApiResponse {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            error!("Error reading analysis request: {}", e);
            return ApiResponse::error(500, MSG_ANALYSIS_FAILED);
        }
    };

    let description = match value.get("recipeDescription").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => RecipeDescription::new(text),
        _ => return ApiResponse::error(400, MSG_DESCRIPTION_REQUIRED),
    };

    ApiResponse::from(analyzer.analyze(&description).await)
}

/// Handle an already decoded request
pub async fn handle_request(analyzer: &NutritionAnalyzer, request: AnalyzeRequest) -> ApiResponse {
    let description = RecipeDescription::new(request.recipe_description);
    ApiResponse::from(analyzer.analyze(&description).await)
}

/// Answer a request when building the analyzer itself may have failed
///
/// A blank description is still reported first; a build failure (e.g. an
/// unreadable `config.toml`) maps to the same envelope as any other error.
pub async fn respond(
    analyzer: Result<NutritionAnalyzer, NutritionError>,
    description: &RecipeDescription,
) -> ApiResponse {
    match analyzer {
        Ok(analyzer) => ApiResponse::from(analyzer.analyze(description).await),
        Err(_) if description.is_blank() => ApiResponse::error(400, MSG_DESCRIPTION_REQUIRED),
        Err(e) => {
            error!("Failed to set up nutrition analyzer: {}", e);
            ApiResponse::from(&e)
        }
    }
}
