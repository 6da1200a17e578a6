use log::{debug, error};
use serde_json::Value;

use crate::error::NutritionError;
use crate::model::{NutritionRecord, NutritionReport};

/// Parse and check a JSON candidate recovered from the model reply.
///
/// `raw` is the untouched model text; it only travels inside the error for
/// operator logs. No repair is attempted on malformed JSON.
pub fn validate(candidate: &str, raw: &str) -> Result<NutritionReport, NutritionError> {
    let value: Value = serde_json::from_str(candidate).map_err(|source| {
        error!("Error parsing JSON from AI response: {}", source);
        debug!("Raw AI response: {}", raw);
        NutritionError::Extraction {
            raw: raw.to_string(),
            source,
        }
    })?;

    let mut record = normalize(value).map_err(|reason| {
        error!("AI response is not a nutrition record: {}", reason);
        debug!("Raw AI response: {}", raw);
        NutritionError::Validation {
            raw: raw.to_string(),
            reason,
        }
    })?;

    record.dedup_health_tags();
    Ok(NutritionReport { recipe: record })
}

/// Unwrap the optional `recipe` envelope and check the record's shape.
fn normalize(value: Value) -> Result<NutritionRecord, String> {
    let body = match value {
        Value::Object(mut map) if map.contains_key("recipe") => map
            .remove("recipe")
            .ok_or_else(|| "missing recipe object".to_string())?,
        Value::Object(map) => Value::Object(map),
        other => return Err(format!("expected a JSON object, got {}", json_kind(&other))),
    };

    let record: NutritionRecord = serde_json::from_value(body).map_err(|e| e.to_string())?;
    check_record(&record)?;
    Ok(record)
}

fn check_record(record: &NutritionRecord) -> Result<(), String> {
    if record.title.trim().is_empty() {
        return Err("title is empty".to_string());
    }
    if record.ingredients.is_empty() {
        return Err("ingredients list is empty".to_string());
    }
    if record.servings <= 0.0 {
        return Err(format!("servings must be positive, got {}", record.servings));
    }

    for (field, value) in record.numeric_fields() {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{field} must be a non-negative number, got {value}"));
        }
    }

    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_json() -> Value {
        json!({
            "title": "Eggs and Toast",
            "ingredients": [
                {"name": "eggs", "amount": "2 large", "calories": 140, "protein": 12, "carbs": 1, "fat": 10},
                {"name": "toast", "amount": "1 slice", "calories": 80, "protein": 3, "carbs": 15, "fat": 1}
            ],
            "totalNutrition": {"calories": 220, "protein": 15, "carbs": 16, "fat": 11, "fiber": 1, "sugar": 2, "sodium": 300},
            "servings": 1,
            "vitamins": {"a": 10, "c": 0, "d": 10, "e": 5, "k": 1},
            "minerals": {"calcium": 6, "iron": 10, "potassium": 4, "magnesium": 5},
            "cookingMethod": "Fried eggs with toasted bread",
            "healthTags": ["high-protein", "breakfast"]
        })
    }

    fn validation_reason(result: Result<NutritionReport, NutritionError>) -> String {
        match result {
            Err(NutritionError::Validation { reason, .. }) => reason,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrapped_record() {
        let candidate = json!({ "recipe": record_json() }).to_string();
        let report = validate(&candidate, "raw").unwrap();
        assert_eq!(report.recipe.title, "Eggs and Toast");
        assert_eq!(report.recipe.total_nutrition.calories, 220.0);
    }

    #[test]
    fn test_bare_record_is_accepted() {
        let candidate = record_json().to_string();
        let report = validate(&candidate, "raw").unwrap();
        assert_eq!(report.recipe.ingredients.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_extraction_error() {
        let result = validate("I could not analyze that.", "I could not analyze that.");
        match result {
            Err(NutritionError::Extraction { raw, .. }) => {
                assert_eq!(raw, "I could not analyze that.")
            }
            other => panic!("expected extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_comma_is_not_repaired() {
        let result = validate("{\"title\": \"x\",}", "raw");
        assert!(matches!(result, Err(NutritionError::Extraction { .. })));
    }

    #[test]
    fn test_numeric_string_is_rejected() {
        let mut value = record_json();
        value["totalNutrition"]["calories"] = json!("220");
        let reason = validation_reason(validate(&value.to_string(), "raw"));
        assert!(reason.contains("invalid type"), "{reason}");
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let mut value = record_json();
        value.as_object_mut().unwrap().remove("minerals");
        let reason = validation_reason(validate(&value.to_string(), "raw"));
        assert!(reason.contains("minerals"), "{reason}");
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        let mut value = record_json();
        value["ingredients"] = json!([]);
        let reason = validation_reason(validate(&value.to_string(), "raw"));
        assert_eq!(reason, "ingredients list is empty");
    }

    #[test]
    fn test_zero_servings_rejected() {
        let mut value = record_json();
        value["servings"] = json!(0);
        let reason = validation_reason(validate(&value.to_string(), "raw"));
        assert!(reason.contains("servings"));
    }

    #[test]
    fn test_negative_value_rejected() {
        let mut value = record_json();
        value["vitamins"]["c"] = json!(-3);
        let reason = validation_reason(validate(&value.to_string(), "raw"));
        assert!(reason.starts_with("vitamins.c"), "{reason}");
    }

    #[test]
    fn test_array_payload_rejected() {
        let reason = validation_reason(validate("[1, 2, 3]", "raw"));
        assert_eq!(reason, "expected a JSON object, got an array");
    }

    #[test]
    fn test_health_tags_deduplicated() {
        let mut value = record_json();
        value["healthTags"] = json!(["vegetarian", "quick", "vegetarian"]);
        let report = validate(&value.to_string(), "raw").unwrap();
        assert_eq!(report.recipe.health_tags, vec!["vegetarian", "quick"]);
    }
}
