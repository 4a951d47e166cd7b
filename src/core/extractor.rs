//! Turns the raw text of one input file into validated ages.
//!
//! Two layouts are recognised, tried in this order:
//!
//! 1. array of objects: `[{"age": 20, "name": "x"}, ...]`
//! 2. object with an `ages` array: `{"ages": [20, 30]}`
//!
//! Objects without an `age` key are skipped. Every extracted value must be
//! a JSON integer `>= MIN_AGE`; the upper bound is checked by the
//! calculator over the combined collection.

use crate::domain::model::MIN_AGE;
use crate::utils::error::{AgeStatsError, Result};
use serde_json::{Map, Value};

pub fn extract_ages(text: &str, source: &str) -> Result<Vec<u64>> {
    if text.trim().is_empty() {
        return Err(AgeStatsError::validation(format!(
            "Empty input text from {}",
            source
        )));
    }

    let data: Value = serde_json::from_str(text).map_err(|e| {
        AgeStatsError::parsing(format!("Could not parse JSON from {}: {}", source, e))
    })?;

    let ages = match &data {
        Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => {
            from_array_of_objects(items, source)?
        }
        Value::Object(obj) if obj.contains_key("ages") => from_ages_field(obj, source)?,
        _ => {
            return Err(AgeStatsError::validation(format!(
                "Unsupported data format in {}",
                source
            )))
        }
    };

    if ages.is_empty() {
        return Err(AgeStatsError::validation(format!(
            "No valid ages found in {}",
            source
        )));
    }

    tracing::info!("Extracted {} ages from {}", ages.len(), source);
    Ok(ages)
}

fn from_array_of_objects(items: &[Value], source: &str) -> Result<Vec<u64>> {
    let mut ages = Vec::new();

    for item in items {
        let Value::Object(obj) = item else {
            return Err(AgeStatsError::validation(format!(
                "Expected object in array, got {} in {}",
                json_type_name(item),
                source
            )));
        };

        match obj.get("age") {
            Some(age) => ages.push(validate_age(age, source)?),
            None => tracing::debug!("Skipping item without 'age' in {}", source),
        }
    }

    Ok(ages)
}

fn from_ages_field(obj: &Map<String, Value>, source: &str) -> Result<Vec<u64>> {
    let Some(Value::Array(values)) = obj.get("ages") else {
        return Err(AgeStatsError::validation(format!(
            "'ages' field must be an array in {}",
            source
        )));
    };

    values.iter().map(|age| validate_age(age, source)).collect()
}

/// Accepts JSON integers only: floats such as `20.0` and numeric strings
/// are rejected, as are integers beyond `i64::MAX`.
fn validate_age(value: &Value, source: &str) -> Result<u64> {
    match value.as_i64() {
        Some(age) if age >= MIN_AGE as i64 => Ok(age as u64),
        _ => Err(AgeStatsError::validation(format!(
            "Invalid age value '{}' in {}",
            value, source
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;

    fn category_of(text: &str) -> ErrorCategory {
        extract_ages(text, "input.json").unwrap_err().category()
    }

    #[test]
    fn test_array_of_objects() {
        let ages = extract_ages(r#"[{"age":20},{"age":30},{"age":40}]"#, "a.json").unwrap();
        assert_eq!(ages, vec![20, 30, 40]);
    }

    #[test]
    fn test_object_with_ages_field() {
        let ages = extract_ages(r#"{"ages":[10,20]}"#, "b.json").unwrap();
        assert_eq!(ages, vec![10, 20]);
    }

    #[test]
    fn test_other_fields_are_ignored() {
        let text = r#"[{"user_id": 1, "age": 33, "name": "ana"}]"#;
        assert_eq!(extract_ages(text, "c.json").unwrap(), vec![33]);
    }

    #[test]
    fn test_items_without_age_are_skipped() {
        let text = r#"[{"age":25},{"name":"x"},{"age":35}]"#;
        assert_eq!(extract_ages(text, "mixed.json").unwrap(), vec![25, 35]);
    }

    #[test]
    fn test_duplicates_and_order_are_preserved() {
        let ages = extract_ages(r#"{"ages":[40,10,40,0]}"#, "dup.json").unwrap();
        assert_eq!(ages, vec![40, 10, 40, 0]);
    }

    #[test]
    fn test_empty_ages_field_is_validation_error() {
        let err = extract_ages(r#"{"ages":[]}"#, "empty.json").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("No valid ages found in empty.json"));
    }

    #[test]
    fn test_all_items_missing_age_is_validation_error() {
        let err = extract_ages(r#"[{"name":"a"},{"name":"b"}]"#, "names.json").unwrap_err();
        assert!(err.to_string().contains("No valid ages found"));
    }

    #[test]
    fn test_malformed_json_is_parsing_error() {
        assert_eq!(category_of("not valid json {"), ErrorCategory::Parsing);
    }

    #[test]
    fn test_blank_text_is_validation_error() {
        assert_eq!(category_of("   \n\t "), ErrorCategory::Validation);
        assert_eq!(category_of(""), ErrorCategory::Validation);
    }

    #[test]
    fn test_negative_age_names_value_and_source() {
        let err = extract_ages(r#"[{"age":-5}]"#, "neg.json").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        let message = err.to_string();
        assert!(message.contains("'-5'"));
        assert!(message.contains("neg.json"));
    }

    #[test]
    fn test_float_and_string_ages_are_rejected() {
        assert_eq!(category_of(r#"[{"age":20.5}]"#), ErrorCategory::Validation);
        assert_eq!(category_of(r#"[{"age":20.0}]"#), ErrorCategory::Validation);
        assert_eq!(category_of(r#"{"ages":["20"]}"#), ErrorCategory::Validation);
        assert_eq!(category_of(r#"{"ages":[null]}"#), ErrorCategory::Validation);
        assert_eq!(category_of(r#"{"ages":[true]}"#), ErrorCategory::Validation);
    }

    #[test]
    fn test_upper_bound_is_not_checked_here() {
        assert_eq!(extract_ages(r#"{"ages":[200]}"#, "old.json").unwrap(), vec![200]);
    }

    #[test]
    fn test_non_object_in_selected_array_shape() {
        let err = extract_ages(r#"[{"age":20}, 30]"#, "odd.json").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("Expected object in array, got number"));
    }

    #[test]
    fn test_unsupported_shapes() {
        for text in [
            "[]",
            "[1, 2, 3]",
            r#"{"age": 20}"#,
            r#"{"people": []}"#,
            "42",
            r#""ages""#,
            "null",
        ] {
            let err = extract_ages(text, "shape.json").unwrap_err();
            assert!(
                err.to_string().contains("Unsupported data format in shape.json"),
                "unexpected error for {}: {}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_ages_field_must_be_array() {
        let err = extract_ages(r#"{"ages": 25}"#, "scalar.json").unwrap_err();
        assert!(err
            .to_string()
            .contains("'ages' field must be an array in scalar.json"));
    }
}
