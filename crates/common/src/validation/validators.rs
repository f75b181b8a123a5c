// Field Validators - Reusable validation components
use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Range validator for numeric types
#[derive(Debug, Clone)]
pub struct RangeValidator<T> {
    min: Option<T>,
    max: Option<T>,
    message: Option<String>,
}

impl<T> Default for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    /// Create a new range validator with no constraints
    pub fn empty() -> Self {
        Self { min: None, max: None, message: None }
    }

    /// Set minimum value
    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum value
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    /// Replace the generated message on failure
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> FieldValidator<T> for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        // partial_cmp against NaN fails both bounds, so check comparability first
        if value.partial_cmp(value).is_none() {
            return Err(self.message.clone().unwrap_or_else(|| "Value must be a number".into()));
        }

        if let Some(ref min) = self.min {
            if value < min {
                return Err(self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Value must be at least {}", min)));
            }
        }

        if let Some(ref max) = self.max {
            if value > max {
                return Err(self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Value must not exceed {}", max)));
            }
        }

        Ok(())
    }
}

/// String validator with various constraints
///
/// Lengths are counted in characters, not bytes.
#[derive(Debug, Clone)]
pub struct StringValidator {
    min_chars: Option<usize>,
    max_chars: Option<usize>,
    not_empty: bool,
    trim: bool,
    message: Option<String>,
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StringValidator {
    /// Create a new string validator
    pub fn new() -> Self {
        Self { min_chars: None, max_chars: None, not_empty: false, trim: true, message: None }
    }

    /// Require non-empty string
    pub fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    /// Set minimum length
    pub fn min_chars(mut self, min: usize) -> Self {
        self.min_chars = Some(min);
        self
    }

    /// Set maximum length
    pub fn max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    /// Set whether to trim before validation
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Replace the generated message on failure
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn fail(&self, generated: String) -> Result<(), String> {
        Err(self.message.clone().unwrap_or(generated))
    }
}

impl FieldValidator<str> for StringValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let val = if self.trim { value.trim() } else { value };

        if self.not_empty && val.is_empty() {
            return self.fail("Value cannot be empty".to_string());
        }

        let chars = val.chars().count();

        if let Some(min) = self.min_chars {
            if chars < min {
                return self.fail(format!("Length must be at least {} characters", min));
            }
        }

        if let Some(max) = self.max_chars {
            if chars > max {
                return self.fail(format!("Length must not exceed {} characters", max));
            }
        }

        Ok(())
    }
}

impl FieldValidator<String> for StringValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

/// Collection validator for vectors and slices
#[derive(Debug, Clone, Default)]
pub struct CollectionValidator {
    min_size: Option<usize>,
    max_size: Option<usize>,
    message: Option<String>,
}

impl CollectionValidator {
    /// Create a new collection validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum size
    pub fn min_size(mut self, min: usize) -> Self {
        self.min_size = Some(min);
        self
    }

    /// Set maximum size
    pub fn max_size(mut self, max: usize) -> Self {
        self.max_size = Some(max);
        self
    }

    /// Replace the generated message on failure
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> FieldValidator<[T]> for CollectionValidator {
    fn validate(&self, value: &[T]) -> Result<(), String> {
        let size = value.len();

        if let Some(min) = self.min_size {
            if size < min {
                return Err(self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Collection must contain at least {} items", min)));
            }
        }

        if let Some(max) = self.max_size {
            if size > max {
                return Err(self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Collection must not exceed {} items", max)));
            }
        }

        Ok(())
    }
}

impl<T> FieldValidator<Vec<T>> for CollectionValidator {
    fn validate(&self, value: &Vec<T>) -> Result<(), String> {
        FieldValidator::<[T]>::validate(self, value.as_slice())
    }
}

/// Static email regex pattern compiled once at first use
static EMAIL_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("EMAIL_REGEX pattern is valid and well-formed")
});

/// Email validator
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
    /// Create a new email validator
    pub fn new() -> Self {
        Self
    }
}

impl FieldValidator<str> for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if !EMAIL_REGEX.is_match(value.trim()) {
            return Err("Invalid email format".to_string());
        }

        Ok(())
    }
}

impl FieldValidator<String> for EmailValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

/// ISO-8601 date validator
///
/// Accepts a calendar date (`2024-01-31`), an RFC 3339 timestamp, or a naive
/// timestamp (`2024-01-31T10:00:00`).
#[derive(Debug, Clone, Default)]
pub struct IsoDateValidator;

impl IsoDateValidator {
    /// Create a new date validator
    pub fn new() -> Self {
        Self
    }

    /// Parse a value into a naive timestamp, normalising offsets to UTC
    pub fn parse(value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
            return Some(ts.naive_utc());
        }
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
    }
}

impl FieldValidator<str> for IsoDateValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        match Self::parse(value) {
            Some(_) => Ok(()),
            None => Err(format!("Invalid date: {}", value)),
        }
    }
}

impl FieldValidator<String> for IsoDateValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}
