//! Remote catalog client
//!
//! Reads tours from the CMS and normalizes them. Read failures never reach
//! the caller: the list degrades to the fallback catalog and a single tour
//! degrades to "absent".

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::transport::{CmsTransport, HttpTransport};
use super::{tour_path, tours_list_path, CmsEndpoint};
use crate::error::Result;
use crate::log_error;
use crate::logging::Timer;
use crate::models::{default_tour, fallback_catalog, RawTour, TourRecord};

/// Tour catalog backed by the CMS, or by the fallback catalog when disabled
#[derive(Clone)]
pub struct CatalogClient {
    transport: Option<Arc<dyn CmsTransport>>,
}

impl CatalogClient {
    /// Build a client for the configured endpoint
    pub fn new(endpoint: &CmsEndpoint) -> Self {
        match endpoint {
            CmsEndpoint::Live(base_url) => {
                Self::with_transport(Arc::new(HttpTransport::new(base_url)))
            },
            CmsEndpoint::Disabled => Self::disabled(),
        }
    }

    pub fn with_transport(transport: Arc<dyn CmsTransport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// A client that never performs network I/O
    pub fn disabled() -> Self {
        Self { transport: None }
    }

    pub fn is_live(&self) -> bool {
        self.transport.is_some()
    }

    /// All tours, newest first
    ///
    /// Returns the fallback catalog when the CMS is disabled or the request
    /// fails. An empty collection from a reachable CMS is returned as is.
    pub async fn list_tours(&self) -> Vec<TourRecord> {
        let Some(transport) = &self.transport else {
            debug!("CMS disabled, serving fallback catalog");
            return fallback_catalog();
        };

        let timer = Timer::start("list_tours");
        match fetch_tours(transport.as_ref()).await {
            Ok(tours) => {
                timer.stop();
                info!(count = tours.len(), "Fetched tours from CMS");
                tours
            },
            Err(e) => {
                log_error!(e, "Error fetching tours, serving fallback catalog");
                fallback_catalog()
            },
        }
    }

    /// A single tour by identifier
    ///
    /// When disabled, returns the fallback tour with that identifier, or the
    /// first fallback tour when none matches. When live, any failure or a
    /// non-numeric identifier yields `None`.
    pub async fn get_tour(&self, id: &str) -> Option<TourRecord> {
        let Some(transport) = &self.transport else {
            let catalog = fallback_catalog();
            let wanted = id.trim().parse::<u64>().ok();
            return catalog
                .iter()
                .find(|tour| Some(tour.id) == wanted)
                .or_else(|| catalog.first())
                .cloned();
        };

        let numeric = match id.trim().parse::<u64>() {
            Ok(numeric) => numeric,
            Err(_) => {
                warn!(id = %id, "Ignoring non-numeric tour id");
                return None;
            },
        };

        let timer = Timer::start("get_tour");
        match fetch_tour(transport.as_ref(), numeric).await {
            Ok(tour) => {
                timer.stop();
                Some(tour)
            },
            Err(e) => {
                log_error!(e, "Error fetching tour", tour_id = numeric);
                None
            },
        }
    }

    /// A single tour, or the generic detail record when it cannot be loaded
    pub async fn tour_or_default(&self, id: &str) -> TourRecord {
        match self.get_tour(id).await {
            Some(tour) => tour,
            None => default_tour(id.trim().parse().unwrap_or(0)),
        }
    }
}

async fn fetch_tours(transport: &dyn CmsTransport) -> Result<Vec<TourRecord>> {
    let value = transport.get_json(&tours_list_path()).await?;
    let raw: Vec<RawTour> = serde_json::from_value(value)?;
    Ok(raw.into_iter().map(TourRecord::from).collect())
}

async fn fetch_tour(transport: &dyn CmsTransport, id: u64) -> Result<TourRecord> {
    let value = transport.get_json(&tour_path(id)).await?;
    let raw: RawTour = serde_json::from_value(value)?;
    Ok(TourRecord::from(raw))
}
