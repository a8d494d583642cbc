//! Catalog and submission endpoints
//!
//! Thin handlers over the CMS clients. Catalog reads always answer 200;
//! submissions answer with a [`SubmissionResult`] or an error body. Bodies
//! that fail to parse are reported as validation errors.

use axum::{
    extract::{rejection::JsonRejection, FromRef, Path, State},
    Json,
};
use chrono::Local;
use std::sync::Arc;

use crate::api::health::{cms_component_health, HealthState, CMS_COMPONENT};
use crate::cms::{CatalogClient, CmsEndpoint, SubmissionClient};
use crate::error::Result;
use crate::models::{BookingForm, ContactPayload, NewsletterPayload, SubmissionResult, TourRecord};

/// Shared state of the gateway
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub submissions: SubmissionClient,
    pub health: Arc<HealthState>,
}

impl AppState {
    pub fn new(catalog: CatalogClient, submissions: SubmissionClient) -> Self {
        Self {
            catalog,
            submissions,
            health: Arc::new(HealthState::new()),
        }
    }

    /// Clients for the configured CMS endpoint
    pub fn from_endpoint(endpoint: &CmsEndpoint) -> Self {
        Self::new(CatalogClient::new(endpoint), SubmissionClient::new(endpoint))
    }

    /// Publish the CMS component for readiness checks
    pub async fn record_cms_health(&self) {
        let cms = cms_component_health(&self.catalog);
        self.health
            .update_component(CMS_COMPONENT.to_string(), cms.status, cms.message)
            .await;
    }
}

impl FromRef<AppState> for Arc<HealthState> {
    fn from_ref(state: &AppState) -> Self {
        state.health.clone()
    }
}

/// `GET /api/v1/tours`
pub async fn list_tours(State(state): State<AppState>) -> Json<Vec<TourRecord>> {
    Json(state.catalog.list_tours().await)
}

/// `GET /api/v1/tours/:id`
pub async fn get_tour(State(state): State<AppState>, Path(id): Path<String>) -> Json<TourRecord> {
    Json(state.catalog.tour_or_default(&id).await)
}

/// `POST /api/v1/bookings`
pub async fn create_booking(
    State(state): State<AppState>,
    body: std::result::Result<Json<BookingForm>, JsonRejection>,
) -> Result<Json<SubmissionResult>> {
    let Json(form) = body?;
    form.validate(Local::now().date_naive())?;
    let result = state.submissions.submit_booking(&form.into_payload()).await?;
    Ok(Json(result))
}

/// `POST /api/v1/contact`
pub async fn send_contact(
    State(state): State<AppState>,
    body: std::result::Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<SubmissionResult>> {
    let Json(payload) = body?;
    let result = state.submissions.submit_contact(&payload).await?;
    Ok(Json(result))
}

/// `POST /api/v1/newsletter`
pub async fn subscribe_newsletter(
    State(state): State<AppState>,
    body: std::result::Result<Json<NewsletterPayload>, JsonRejection>,
) -> Result<Json<SubmissionResult>> {
    let Json(payload) = body?;
    let result = state.submissions.subscribe_newsletter(&payload.email).await?;
    Ok(Json(result))
}
