//! Response shape checks applied before typed decoding

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::ApiError;

/// Parse a response body into JSON. An empty body reads as `null`.
pub fn parse_body(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
        .map_err(|err| ApiError::serialization("Failed to parse response body as JSON", err))
}

pub fn expect_object(value: &Value, what: &str) -> Result<(), ApiError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ApiError::InvalidResponse(format!(
            "expected {what} to be an object, got {}",
            type_name(value)
        )))
    }
}

pub fn expect_array(value: &Value, what: &str) -> Result<(), ApiError> {
    if value.is_array() {
        Ok(())
    } else {
        Err(ApiError::InvalidResponse(format!(
            "expected {what} to be an array, got {}",
            type_name(value)
        )))
    }
}

/// Object carrying every field in `fields` with a non-null value
pub fn expect_fields(value: &Value, what: &str, fields: &[&str]) -> Result<(), ApiError> {
    expect_object(value, what)?;
    let missing: Vec<&str> =
        fields.iter().copied().filter(|field| value.get(field).map_or(true, Value::is_null)).collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::InvalidResponse(format!("{what} is missing {}", missing.join(", "))))
    }
}

/// Array whose items are all objects carrying `fields`
pub fn expect_records(value: &Value, what: &str, fields: &[&str]) -> Result<(), ApiError> {
    expect_array(value, what)?;
    if let Some(items) = value.as_array() {
        for (index, item) in items.iter().enumerate() {
            expect_fields(item, &format!("{what}[{index}]"), fields)?;
        }
    }
    Ok(())
}

pub fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|err| ApiError::serialization(format!("Failed to decode {what}"), err))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
