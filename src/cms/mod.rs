//! WordPress CMS clients
//!
//! The catalog client reads tours and never fails outward: when the CMS is
//! unreachable or disabled it serves the bundled fallback catalog. The
//! submission client posts bookings, contact messages and newsletter
//! sign-ups, answering with demo results when no backend is configured.

pub mod catalog;
pub mod submission;
pub mod transport;

pub use catalog::CatalogClient;
pub use submission::SubmissionClient;
pub use transport::{CmsTransport, HttpTransport};

/// Tours collection, newest first, with featured media embedded
pub const TOURS_PATH: &str = "wp/v2/tours";

/// Page size requested for the tours collection
pub const TOURS_PER_PAGE: u32 = 20;

pub const BOOKINGS_PATH: &str = "floral/v1/bookings";
pub const CONTACT_PATH: &str = "floral/v1/contact";
pub const NEWSLETTER_PATH: &str = "floral/v1/newsletter/subscribe";

/// Where CMS calls go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmsEndpoint {
    /// REST root of a reachable WordPress installation, without trailing slash
    Live(String),
    /// No CMS: fallback catalog and demo submissions
    Disabled,
}

impl CmsEndpoint {
    pub fn is_live(&self) -> bool {
        matches!(self, CmsEndpoint::Live(_))
    }
}

/// Path of the tours collection query
pub fn tours_list_path() -> String {
    format!("{}?_embed&per_page={}", TOURS_PATH, TOURS_PER_PAGE)
}

/// Path of a single tour query
pub fn tour_path(id: u64) -> String {
    format!("{}/{}?_embed", TOURS_PATH, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(tours_list_path(), "wp/v2/tours?_embed&per_page=20");
        assert_eq!(tour_path(42), "wp/v2/tours/42?_embed");
    }
}
