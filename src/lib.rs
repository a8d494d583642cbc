//! Floral Tours Library
//!
//! Content gateway for the Floral Kingdom Tours site: CMS content
//! normalization, a tour catalog client with an offline fallback, and a
//! submission client for bookings, contact messages and newsletter
//! sign-ups. The modules are exposed for integration tests and for the
//! gateway binary.

pub mod api;
pub mod cms;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod models;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used types at the crate root
pub use config::Config;
pub use error::{Error, Result};

// Re-export the content normalizer
pub use content::{clean_content, excerpt, page_title};

// Re-export CMS clients
pub use cms::{CatalogClient, CmsEndpoint, CmsTransport, HttpTransport, SubmissionClient};

// Re-export model types
pub use models::{
    BookingForm, BookingPayload, Carousel, ContactPayload, FormState, NewsletterPayload,
    SubmissionResult, TourRecord, ValidationError, ValidationErrorKind, ValidationErrors,
};

// Re-export API server functions
pub use api::server::{create_router, create_server, shutdown_signal};

// Re-export health check types
pub use api::{
    AppState, BuildInfo, ComponentHealth, HealthResponse, HealthState, HealthStatus,
    ReadyResponse,
};
