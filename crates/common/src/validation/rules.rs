// Validation Rules - single-purpose checks returning caller-facing messages
use chrono::NaiveDateTime;

use super::validators::{
    EmailValidator, FieldValidator, IsoDateValidator, RangeValidator, StringValidator,
};

/// Fails with `message` when `value` is empty after trimming.
pub fn required(value: &str, message: &str) -> Result<(), String> {
    StringValidator::new().not_empty().message(message).validate(value)
}

/// Fails with `message` unless `value` looks like an email address.
pub fn email(value: &str, message: &str) -> Result<(), String> {
    EmailValidator::new().validate(value).map_err(|_| message.to_string())
}

/// Fails with `message` for negative or non-finite numbers.
pub fn non_negative(value: f64, message: &str) -> Result<(), String> {
    if !value.is_finite() {
        return Err(message.to_string());
    }
    RangeValidator::empty().min(0.0).message(message).validate(&value)
}

/// Fails with `message` unless `value` is a positive identifier.
pub fn positive_id(value: i64, message: &str) -> Result<(), String> {
    RangeValidator::empty().min(1).message(message).validate(&value)
}

/// Parses an ISO-8601 date or timestamp.
pub fn parse_iso_date(value: &str) -> Option<NaiveDateTime> {
    IsoDateValidator::parse(value)
}

/// Fails with `"{label} must be a valid ISO-8601 date"` when unparseable.
pub fn iso_date(value: &str, label: &str) -> Result<NaiveDateTime, String> {
    parse_iso_date(value).ok_or_else(|| format!("{label} must be a valid ISO-8601 date"))
}

/// Parses both bounds and requires `from` to be strictly before `to`.
pub fn date_range(from: &str, to: &str) -> Result<(NaiveDateTime, NaiveDateTime), String> {
    let start = iso_date(from, "from")?;
    let end = iso_date(to, "to")?;
    if start >= end {
        return Err("from must be before to".to_string());
    }
    Ok((start, end))
}
