//! Data models for Floral Tours
//!
//! This module contains the domain models used throughout the application:
//! tours as delivered by the CMS and as served to the site, submission
//! payloads and their validation, and the presentation-side state machines.

pub mod carousel;
pub mod error;
pub mod form;
pub mod submission;
pub mod tour;
pub mod validation;

// Re-export commonly used types
pub use carousel::Carousel;
pub use error::{ValidationError, ValidationErrorKind, ValidationErrors};
pub use form::{run_submission, FormEvent, FormState, InvalidTransition};
pub use submission::{
    BookingForm, BookingPayload, ContactPayload, ContactSubject, NewsletterPayload,
    PreferredContact, SubmissionResult, DEMO_MARKER,
};
pub use tour::{default_tour, fallback_catalog, RawTour, TourRecord};
pub use validation::{is_valid_email, validate_email};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        // Ensure all key types are accessible
        let _catalog: Vec<TourRecord> = fallback_catalog();
        let _carousel = Carousel::new(_catalog.len());
        let _state = FormState::idle();
        let _subject = ContactSubject::TourInquiry;
        let _error = ValidationError::new(ValidationErrorKind::InvalidEmail, "email");
        assert!(is_valid_email("guest@example.com"));
    }
}
