//! Health check endpoints for Floral Tours
//!
//! This module implements health and readiness checks for orchestration
//! platforms. Readiness reports the CMS as degraded while the gateway runs
//! on the fallback catalog and demo submissions.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{ComponentHealth, HealthResponse, HealthStatus, ReadyResponse, BUILD_INFO};
use crate::cms::CatalogClient;

/// Component name used for the CMS in readiness checks
pub const CMS_COMPONENT: &str = "cms";

/// Application state for health checks
#[derive(Clone)]
pub struct HealthState {
    /// Shared state for component health tracking
    pub components: Arc<tokio::sync::RwLock<HashMap<String, ComponentHealth>>>,
}

impl HealthState {
    /// Create a new health state
    pub fn new() -> Self {
        Self {
            components: Arc::new(tokio::sync::RwLock::new(HashMap::new())),
        }
    }

    /// Update component health status
    pub async fn update_component(
        &self,
        name: String,
        status: HealthStatus,
        message: Option<String>,
    ) {
        let mut components = self.components.write().await;
        components.insert(
            name,
            ComponentHealth {
                status,
                message,
                last_check: Utc::now(),
            },
        );
    }

    /// Get overall health status
    pub async fn get_status(&self) -> HealthStatus {
        let components = self.components.read().await;

        if components.values().any(|c| c.status == HealthStatus::Unhealthy) {
            return HealthStatus::Unhealthy;
        }

        if components.values().any(|c| c.status == HealthStatus::Degraded) {
            return HealthStatus::Degraded;
        }

        HealthStatus::Healthy
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health of the CMS integration as configured
pub fn cms_component_health(catalog: &CatalogClient) -> ComponentHealth {
    let (status, message) = if catalog.is_live() {
        (HealthStatus::Healthy, "CMS endpoint configured")
    } else {
        (
            HealthStatus::Degraded,
            "CMS disabled, serving fallback catalog and demo submissions",
        )
    };

    ComponentHealth {
        status,
        message: Some(message.to_string()),
        last_check: Utc::now(),
    }
}

/// Basic liveness check endpoint
///
/// Returns 200 OK if the service is alive. Never touches the CMS.
///
/// # Example
/// ```text
/// GET /healthz
/// ```
pub async fn health_check() -> Response {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        message: Some("Service is running".to_string()),
        timestamp: Utc::now(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Readiness check endpoint
///
/// # Example
/// ```text
/// GET /readyz
/// ```
pub async fn ready_check(State(state): State<Arc<HealthState>>) -> Response {
    let components = state.components.read().await.clone();
    let overall_status = state.get_status().await;

    let response = ReadyResponse {
        status: overall_status,
        checks: components,
        timestamp: Utc::now(),
    };

    (overall_status.to_status_code(), Json(response)).into_response()
}

/// Build information endpoint
///
/// # Example
/// ```text
/// GET /build
/// ```
pub async fn build_info() -> Response {
    (StatusCode::OK, Json(&BUILD_INFO)).into_response()
}
