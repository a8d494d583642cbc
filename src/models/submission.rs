//! Submission payload models
//!
//! Bookings, contact messages and newsletter sign-ups as collected from the
//! presentation layer, the wire payloads posted to the CMS, and the result
//! returned for each.

use chrono::NaiveDate;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use validator::Validate;

use super::error::{ValidationError, ValidationErrorKind, ValidationErrors};
use super::tour::lenient_string;
use super::validation::{
    validate_accepted, validate_booking_date, validate_email, validate_email_field,
    validate_party_size_field, validate_required,
};

/// Prefix carried by every result produced without a backend
pub const DEMO_MARKER: &str = "Demo mode:";

/// Tour booked when the form arrives without one
pub const DEFAULT_TOUR_ID: u64 = 1;

/// Title shown when the form was opened without a tour
pub const DEFAULT_TOUR_TITLE: &str = "Tour Booking";

/// Subjects offered by the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactSubject {
    TourInquiry,
    Booking,
    CustomTour,
    GroupBooking,
    Complaint,
    Other,
}

impl ContactSubject {
    /// Parse a subject from its form value
    pub fn from_str(s: &str) -> Result<Self, ValidationError> {
        match s.trim() {
            "tour-inquiry" => Ok(ContactSubject::TourInquiry),
            "booking" => Ok(ContactSubject::Booking),
            "custom-tour" => Ok(ContactSubject::CustomTour),
            "group-booking" => Ok(ContactSubject::GroupBooking),
            "complaint" => Ok(ContactSubject::Complaint),
            "other" => Ok(ContactSubject::Other),
            "" => Err(ValidationError::new(
                ValidationErrorKind::RequiredField,
                "subject",
            )),
            _ => Err(ValidationError::with_context(
                ValidationErrorKind::UnknownOption,
                "subject",
                format!("Unknown subject: {}", s),
            )),
        }
    }

    /// Form value of this subject
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactSubject::TourInquiry => "tour-inquiry",
            ContactSubject::Booking => "booking",
            ContactSubject::CustomTour => "custom-tour",
            ContactSubject::GroupBooking => "group-booking",
            ContactSubject::Complaint => "complaint",
            ContactSubject::Other => "other",
        }
    }
}

impl std::fmt::Display for ContactSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the sender would like to be answered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredContact {
    #[default]
    Email,
    Phone,
    Whatsapp,
}

fn default_tour_id() -> u64 {
    DEFAULT_TOUR_ID
}

fn default_tour_title() -> String {
    DEFAULT_TOUR_TITLE.to_string()
}

fn default_participants() -> u32 {
    1
}

/// Form inputs post numbers as strings; `None` when blank or not a number
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => Ok(n.to_string().parse().ok()),
        Some(Value::String(s)) => Ok(s.trim().parse().ok()),
        None | Some(Value::Null) => Ok(None),
        Some(other) => Err(D::Error::custom(format!(
            "invalid type: {}, expected a number",
            other
        ))),
    }
}

fn lenient_tour_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(DEFAULT_TOUR_ID))
}

/// Unreadable counts become 0 so the range check reports them
fn lenient_participants<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0))
}

/// Booking form as filled in on a tour page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    #[serde(default = "default_tour_id", deserialize_with = "lenient_tour_id")]
    pub tour_id: u64,

    #[serde(default = "default_tour_title")]
    pub tour_title: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    /// `YYYY-MM-DD`
    #[serde(default)]
    pub tour_date: String,

    #[serde(default = "default_participants", deserialize_with = "lenient_participants")]
    pub participants: u32,

    #[serde(default)]
    pub special_requests: String,

    #[serde(default)]
    pub agree_to_terms: bool,
}

impl BookingForm {
    /// Check every field against `today`, collecting one error per failed rule
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(validate_required(&self.first_name, "firstName"));
        errors.check(validate_required(&self.last_name, "lastName"));
        errors.check(validate_email_field(&self.email, "email"));
        errors.check(validate_required(&self.phone, "phone"));
        errors.check(validate_booking_date(&self.tour_date, today, "tourDate"));
        errors.check(validate_party_size_field(self.participants, "participants"));
        errors.check(validate_accepted(self.agree_to_terms, "agreeToTerms"));

        errors.into_result(())
    }

    /// Build the wire payload posted to the booking endpoint
    pub fn into_payload(self) -> BookingPayload {
        BookingPayload {
            tour_id: self.tour_id,
            customer_name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
            customer_email: self.email.trim().to_string(),
            customer_phone: self.phone.trim().to_string(),
            booking_date: self.tour_date.trim().to_string(),
            party_size: self.participants,
            special_requests: self.special_requests,
        }
    }
}

/// Booking request as posted to the CMS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BookingPayload {
    pub tour_id: u64,

    #[validate(length(min = 1))]
    pub customer_name: String,

    #[validate(custom(function = "validate_email"))]
    pub customer_email: String,

    #[validate(length(min = 1))]
    pub customer_phone: String,

    #[validate(length(min = 1))]
    pub booking_date: String,

    #[validate(range(min = 1, max = 12))]
    pub party_size: u32,

    #[serde(default)]
    pub special_requests: String,
}

/// Contact message as posted to the CMS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPayload {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    /// One of the [`ContactSubject`] form values
    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub message: String,

    #[serde(rename = "preferredContact", default)]
    pub preferred_contact: PreferredContact,
}

impl ContactPayload {
    /// Validate all fields without using the validator crate
    pub fn validate_fields(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(validate_required(&self.name, "name"));
        errors.check(validate_email_field(&self.email, "email"));
        errors.check(ContactSubject::from_str(&self.subject));
        errors.check(validate_required(&self.message, "message"));

        errors.into_result(())
    }
}

/// Newsletter sign-up as posted to the CMS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterPayload {
    #[serde(default)]
    pub email: String,
}

impl NewsletterPayload {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
        }
    }
}

fn default_success() -> bool {
    true
}

/// Outcome of a submission, either from the CMS or produced in demo mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    #[serde(default = "default_success")]
    pub success: bool,

    #[serde(default)]
    pub message: String,

    /// Booking reference, when the endpoint issues one
    #[serde(
        default,
        alias = "booking_id",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
}

impl SubmissionResult {
    /// A result produced locally because no backend is configured
    pub fn demo(message: impl AsRef<str>, id: Option<String>) -> Self {
        Self {
            success: true,
            message: format!("{} {}", DEMO_MARKER, message.as_ref()),
            id,
        }
    }

    /// Whether this result was produced without contacting a backend
    pub fn is_demo(&self) -> bool {
        self.message.starts_with(DEMO_MARKER)
    }
}

/// Builder for creating test booking forms
#[cfg(test)]
pub struct BookingFormBuilder {
    form: BookingForm,
}

#[cfg(test)]
impl BookingFormBuilder {
    pub fn new() -> Self {
        Self {
            form: BookingForm {
                tour_id: 2,
                tour_title: "Cape Point Explorer".to_string(),
                first_name: "Thandi".to_string(),
                last_name: "Mokoena".to_string(),
                email: "thandi@example.co.za".to_string(),
                phone: "+27 82 555 0100".to_string(),
                tour_date: "2026-12-01".to_string(),
                participants: 2,
                special_requests: String::new(),
                agree_to_terms: true,
            },
        }
    }

    pub fn email(mut self, email: &str) -> Self {
        self.form.email = email.to_string();
        self
    }

    pub fn tour_date(mut self, date: &str) -> Self {
        self.form.tour_date = date.to_string();
        self
    }

    pub fn participants(mut self, participants: u32) -> Self {
        self.form.participants = participants;
        self
    }

    pub fn agree_to_terms(mut self, agreed: bool) -> Self {
        self.form.agree_to_terms = agreed;
        self
    }

    pub fn build(self) -> BookingForm {
        self.form
    }
}
