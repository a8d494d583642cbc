//! Validation error types for form and payload models
//!
//! These errors never leave the process: they are produced before any CMS
//! call and carry enough field information to render inline messages.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Main validation error type
#[derive(Error, Debug, Clone)]
pub struct ValidationError {
    /// The kind of validation error
    pub kind: ValidationErrorKind,
    /// The field that failed validation
    pub field: String,
    /// Optional additional context
    pub context: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ValidationErrorKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            context: None,
        }
    }

    /// Create a validation error with additional context
    pub fn with_context(
        kind: ValidationErrorKind,
        field: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            context: Some(context.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(
                f,
                "Validation failed for field '{}': {} - {}",
                self.field, self.kind, ctx
            ),
            None => write!(
                f,
                "Validation failed for field '{}': {}",
                self.field, self.kind
            ),
        }
    }
}

/// Specific validation error types
///
/// The display strings double as the inline messages shown next to form
/// fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Field is required but missing or blank
    #[error("This field is required")]
    RequiredField,

    /// Email does not look like `someone@domain.tld`
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Date is not a `YYYY-MM-DD` calendar date
    #[error("Please enter a valid date")]
    InvalidDate,

    /// Tour date lies before today
    #[error("Tour date cannot be in the past")]
    DateInPast,

    /// Party size outside the bookable range
    #[error("Participants must be between {min} and {max}")]
    PartySizeOutOfRange { min: u32, max: u32 },

    /// Terms and conditions were not accepted
    #[error("You must agree to the terms and conditions")]
    TermsNotAccepted,

    /// Value is not one of the accepted options
    #[error("Please choose one of the listed options")]
    UnknownOption,

    /// Custom validation error
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Collection of validation errors
#[derive(Debug, Default, Clone)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Record the error of a field check, if any
    pub fn check<T>(&mut self, result: ValidationResult<T>) {
        if let Err(e) = result {
            self.add(e);
        }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Whether a given field has an error
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// One inline message per offending field; the first error wins
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        let mut messages = BTreeMap::new();
        for error in &self.errors {
            messages
                .entry(error.field.clone())
                .or_insert_with(|| error.kind.to_string());
        }
        messages
    }

    /// Convert to a Result
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed with {} error(s):", self.errors.len())?;
            for error in &self.errors {
                write!(f, "\n  - {}", error)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

/// Convert validation errors to application errors
impl From<ValidationError> for crate::error::Error {
    fn from(err: ValidationError) -> Self {
        crate::error::Error::Validation(err.into())
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected = Self::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let kind = match error.code.as_ref() {
                    "email" => ValidationErrorKind::InvalidEmail,
                    "range" => ValidationErrorKind::PartySizeOutOfRange {
                        min: super::validation::MIN_PARTY_SIZE,
                        max: super::validation::MAX_PARTY_SIZE,
                    },
                    "required" | "length" => ValidationErrorKind::RequiredField,
                    other => ValidationErrorKind::Custom(other.to_string()),
                };
                collected.add(ValidationError::new(kind, field.to_string()));
            }
        }
        collected
    }
}
