// Validation Module - small composable validators shared by the API modules
use std::fmt;

mod rules;
mod validators;

pub use rules::{
    date_range, email, iso_date, non_negative, parse_iso_date, positive_id, required,
};
pub use validators::{
    CollectionValidator, EmailValidator, FieldValidator, IsoDateValidator, RangeValidator,
    StringValidator,
};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error with field-level details
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Create with a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable messages without the "Validation failed" prefix.
    ///
    /// A single error yields its message verbatim.
    pub fn message(&self) -> String {
        self.errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("; ")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "Validation error with no specific field errors"),
            [single] => write!(f, "Validation failed: {}", single.message),
            many => {
                write!(f, "Validation failed with {} errors: ", many.len())?;
                for (i, error) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", error.field, error.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Individual field error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Collects field errors for one request
///
/// With `stop_on_first_error` only the first failure is recorded, which is
/// what the API modules use so the caller sees one precise message.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
    stop_on_first: bool,
    path: Vec<String>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop on first error
    pub fn stop_on_first_error(mut self) -> Self {
        self.stop_on_first = true;
        self
    }

    fn should_short_circuit(&self) -> bool {
        self.stop_on_first && !self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        if self.should_short_circuit() {
            return;
        }
        let field = if self.path.is_empty() {
            field.into()
        } else {
            format!("{}.{}", self.path.join("."), field.into())
        };
        self.errors.add_field_error(field, message);
    }

    /// Record the outcome of a rule function
    pub fn check(&mut self, field: &str, outcome: Result<(), String>) -> &mut Self {
        if let Err(message) = outcome {
            self.add_error(field, message);
        }
        self
    }

    /// Validate a field with a specific validator
    pub fn validate_field<T, V>(&mut self, field: &str, value: &T, validator: &V) -> &mut Self
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        if self.should_short_circuit() {
            return self;
        }
        let outcome = validator.validate(value);
        self.check(field, outcome)
    }

    /// Validate with nested context (e.g. `events[3]`)
    pub fn validate_nested<F>(&mut self, field: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Validator),
    {
        if self.should_short_circuit() {
            return self;
        }
        self.path.push(field.to_string());
        f(self);
        self.path.pop();
        self
    }

    /// Finalize and return result
    pub fn finalize(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
