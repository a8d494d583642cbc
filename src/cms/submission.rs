//! Submission client
//!
//! Posts bookings, contact messages and newsletter sign-ups. Input is
//! validated before anything is sent; with no backend configured every
//! submission succeeds locally with a result marked as demo.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::transport::{CmsTransport, HttpTransport};
use super::{CmsEndpoint, BOOKINGS_PATH, CONTACT_PATH, NEWSLETTER_PATH};
use crate::error::{Error, Result};
use crate::log_error;
use crate::models::validation::validate_email_field;
use crate::models::{
    BookingPayload, ContactPayload, NewsletterPayload, SubmissionResult, ValidationErrors,
};

pub const BOOKING_FAILED: &str = "Failed to submit booking";
pub const CONTACT_FAILED: &str = "Failed to send message";
pub const NEWSLETTER_FAILED: &str = "Newsletter signup failed";

const DEMO_BOOKING: &str =
    "booking request received. No reservation was made because no booking service is configured.";
const DEMO_CONTACT: &str = "message received. It was not delivered because no backend is configured.";
const DEMO_NEWSLETTER: &str = "subscription noted. No mailing list is configured.";

/// Client for the CMS form endpoints
#[derive(Clone)]
pub struct SubmissionClient {
    transport: Option<Arc<dyn CmsTransport>>,
}

impl SubmissionClient {
    /// Build a client for the configured endpoint
    pub fn new(endpoint: &CmsEndpoint) -> Self {
        match endpoint {
            CmsEndpoint::Live(base_url) => {
                Self::with_transport(Arc::new(HttpTransport::new(base_url)))
            },
            CmsEndpoint::Disabled => Self::demo(),
        }
    }

    pub fn with_transport(transport: Arc<dyn CmsTransport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// A client that answers every submission locally
    pub fn demo() -> Self {
        Self { transport: None }
    }

    pub fn is_demo(&self) -> bool {
        self.transport.is_none()
    }

    /// Submit a booking request
    pub async fn submit_booking(&self, payload: &BookingPayload) -> Result<SubmissionResult> {
        payload.validate().map_err(ValidationErrors::from)?;

        match &self.transport {
            Some(transport) => {
                let result = post(transport.as_ref(), BOOKINGS_PATH, payload, BOOKING_FAILED).await?;
                info!(
                    tour_id = payload.tour_id,
                    party_size = payload.party_size,
                    booking_id = ?result.id,
                    "Booking submitted"
                );
                Ok(result)
            },
            None => Ok(SubmissionResult::demo(DEMO_BOOKING, Some(demo_booking_id()))),
        }
    }

    /// Submit a contact message
    pub async fn submit_contact(&self, payload: &ContactPayload) -> Result<SubmissionResult> {
        payload.validate_fields()?;

        match &self.transport {
            Some(transport) => {
                let result = post(transport.as_ref(), CONTACT_PATH, payload, CONTACT_FAILED).await?;
                info!(subject = %payload.subject, "Contact message sent");
                Ok(result)
            },
            None => Ok(SubmissionResult::demo(DEMO_CONTACT, None)),
        }
    }

    /// Subscribe an email address to the newsletter
    pub async fn subscribe_newsletter(&self, email: &str) -> Result<SubmissionResult> {
        let payload = NewsletterPayload::new(email);
        validate_email_field(&payload.email, "email")?;

        match &self.transport {
            Some(transport) => {
                let result =
                    post(transport.as_ref(), NEWSLETTER_PATH, &payload, NEWSLETTER_FAILED).await?;
                info!("Newsletter subscription recorded");
                Ok(result)
            },
            None => Ok(SubmissionResult::demo(DEMO_NEWSLETTER, None)),
        }
    }
}

/// POST a payload and decode the result
///
/// A CMS error body without a `message` gets the generic message for the
/// endpoint. Transport failures pass through untouched.
async fn post<T: Serialize>(
    transport: &dyn CmsTransport,
    path: &str,
    payload: &T,
    generic_message: &str,
) -> Result<SubmissionResult> {
    let body = serde_json::to_value(payload)?;

    let outcome = match transport.post_json(path, &body).await {
        Ok(value) => serde_json::from_value(value).map_err(Error::from),
        Err(Error::Response { status, message }) => Err(Error::response(
            status,
            Some(message.unwrap_or_else(|| generic_message.to_string())),
        )),
        Err(e) => Err(e),
    };

    if let Err(e) = &outcome {
        log_error!(e, "Submission failed", path = path);
    }
    outcome
}

fn demo_booking_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("DEMO-{}", id[..8].to_uppercase())
}
