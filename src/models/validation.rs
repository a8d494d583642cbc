//! Custom validation functions for form and payload models
//!
//! Reusable checks for emails, required fields, booking dates and party
//! sizes, in two flavours: plain functions for the `validator` derive and
//! field-aware functions returning our own error type.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

use super::error::{ValidationError as ModelValidationError, ValidationErrorKind};

/// Smallest bookable party
pub const MIN_PARTY_SIZE: u32 = 1;

/// Largest bookable party
pub const MAX_PARTY_SIZE: u32 = 12;

/// Date format used by the booking form and the CMS
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get or initialize the email regex pattern
fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid email regex pattern"))
}

/// Whether a string looks like an email address (`x@y.z`, no whitespace runs)
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// Validate email format for validator crate
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

/// Validate a required, well-formed email returning our custom error type
pub fn validate_email_field(email: &str, field_name: &str) -> Result<(), ModelValidationError> {
    validate_required(email, field_name)?;
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ModelValidationError::with_context(
            ValidationErrorKind::InvalidEmail,
            field_name,
            format!("Not an email address: {}", email.trim()),
        ))
    }
}

/// Validate a required field is not empty
pub fn validate_required(value: &str, field_name: &str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        Err(ModelValidationError::new(
            ValidationErrorKind::RequiredField,
            field_name,
        ))
    } else {
        Ok(())
    }
}

/// Validate a booking date: required, `YYYY-MM-DD`, not before `today`
pub fn validate_booking_date(
    date: &str,
    today: NaiveDate,
    field_name: &str,
) -> Result<NaiveDate, ModelValidationError> {
    validate_required(date, field_name)?;

    let parsed = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
        ModelValidationError::with_context(
            ValidationErrorKind::InvalidDate,
            field_name,
            format!("Failed to parse date: {}", e),
        )
    })?;

    if parsed < today {
        return Err(ModelValidationError::with_context(
            ValidationErrorKind::DateInPast,
            field_name,
            format!("{} is before {}", parsed, today),
        ));
    }

    Ok(parsed)
}

/// Validate the number of participants returning our custom error type
pub fn validate_party_size_field(size: u32, field_name: &str) -> Result<u32, ModelValidationError> {
    if (MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(ModelValidationError::with_context(
            ValidationErrorKind::PartySizeOutOfRange {
                min: MIN_PARTY_SIZE,
                max: MAX_PARTY_SIZE,
            },
            field_name,
            format!("Got {}", size),
        ))
    }
}

/// Validate that a checkbox was ticked
pub fn validate_accepted(accepted: bool, field_name: &str) -> Result<(), ModelValidationError> {
    if accepted {
        Ok(())
    } else {
        Err(ModelValidationError::new(
            ValidationErrorKind::TermsNotAccepted,
            field_name,
        ))
    }
}
