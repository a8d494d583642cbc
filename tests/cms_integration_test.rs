//! Integration tests for the CMS clients over real HTTP
//!
//! A stub WordPress REST API is served on an ephemeral local port so the
//! reqwest transport, status mapping and fallbacks are exercised end to end.

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use floral_tours::{
    cms::{CatalogClient, CmsEndpoint, SubmissionClient},
    models::{fallback_catalog, ContactPayload, PreferredContact},
    test_utils::{sample_booking_payload, spawn_stub_cms, wp_tour_json, UNREACHABLE_CMS},
    Error,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Received = Arc<Mutex<Vec<Value>>>;

async fn list_tours(RawQuery(query): RawQuery) -> Response {
    let query = query.unwrap_or_default();
    if !query.contains("_embed") || !query.contains("per_page=20") {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "bad query" }))).into_response();
    }
    Json(json!([
        wp_tour_json(21, "Sunset Cruise &amp; Sundowners"),
        wp_tour_json(20, "<em>Kayak</em> with Dolphins"),
    ]))
    .into_response()
}

async fn single_tour(Path(id): Path<u64>) -> Response {
    if id == 21 {
        Json(wp_tour_json(21, "Sunset Cruise &amp; Sundowners")).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": "rest_post_invalid_id", "message": "Invalid post ID." })),
        )
            .into_response()
    }
}

async fn bookings(State(received): State<Received>, Json(body): Json<Value>) -> Response {
    received.lock().unwrap().push(body.clone());
    if body["party_size"] == 12 {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "code": "fully_booked", "message": "That date is fully booked" })),
        )
            .into_response();
    }
    Json(json!({ "success": true, "message": "Booking received", "booking_id": 5150 })).into_response()
}

async fn contact() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>fatal error</html>").into_response()
}

async fn newsletter(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "success": true, "message": format!("Subscribed {}", body["email"].as_str().unwrap_or("")) }))
}

async fn start_stub_cms() -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/wp-json/wp/v2/tours", get(list_tours))
        .route("/wp-json/wp/v2/tours/:id", get(single_tour))
        .route("/wp-json/floral/v1/bookings", post(bookings))
        .route("/wp-json/floral/v1/contact", post(contact))
        .route("/wp-json/floral/v1/newsletter/subscribe", post(newsletter))
        .with_state(received.clone());

    (spawn_stub_cms(router).await, received)
}

fn contact_payload() -> ContactPayload {
    ContactPayload {
        name: "Ayesha".to_string(),
        email: "ayesha@example.com".to_string(),
        phone: "+27 21 555 0123".to_string(),
        subject: "tour-inquiry".to_string(),
        message: "Is the cable car running in July?".to_string(),
        preferred_contact: PreferredContact::Phone,
    }
}

#[tokio::test]
async fn test_live_catalog_normalizes_cms_posts() {
    let (base_url, _) = start_stub_cms().await;
    let client = CatalogClient::new(&CmsEndpoint::Live(base_url));

    let tours = client.list_tours().await;
    assert_eq!(tours.len(), 2);
    assert_eq!(tours[0].title, "Sunset Cruise & Sundowners");
    assert_eq!(tours[1].title, "Kayak with Dolphins");
    assert_eq!(tours[0].description, "Guided & relaxed.");
    assert_eq!(tours[0].image_url, "https://cms.example/21.jpg");
    assert_eq!(tours[0].meeting_point, "V&A Waterfront, Cape Town");
}

#[tokio::test]
async fn test_live_single_tour() {
    let (base_url, _) = start_stub_cms().await;
    let client = CatalogClient::new(&CmsEndpoint::Live(base_url));

    let tour = client.get_tour("21").await.unwrap();
    assert_eq!(tour.price, "R1,100");
    assert_eq!(tour.page_title(), "Sunset Cruise & Sundowners - Floral Kingdom Tours");

    assert!(client.get_tour("404").await.is_none());
    assert_eq!(client.tour_or_default("404").await.title, "Cape Town Tour Experience");
}

#[tokio::test]
async fn test_unreachable_cms_degrades_reads() {
    let client = CatalogClient::new(&CmsEndpoint::Live(UNREACHABLE_CMS.to_string()));

    assert_eq!(client.list_tours().await, fallback_catalog());
    assert!(client.get_tour("999").await.is_none());

    let tour = client.tour_or_default("999").await;
    assert_eq!(tour.id, 999);
    assert!(!tour.title.is_empty());
}

#[tokio::test]
async fn test_live_booking_round_trip() {
    let (base_url, received) = start_stub_cms().await;
    let client = SubmissionClient::new(&CmsEndpoint::Live(base_url));

    let result = client.submit_booking(&sample_booking_payload()).await.unwrap();
    assert!(result.success);
    assert!(!result.is_demo());
    assert_eq!(result.id.as_deref(), Some("5150"));

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["customer_email"], "thandi@example.co.za");
    assert_eq!(received[0]["tour_id"], 2);
}

#[tokio::test]
async fn test_live_booking_conflict_keeps_server_message() {
    let (base_url, _) = start_stub_cms().await;
    let client = SubmissionClient::new(&CmsEndpoint::Live(base_url));

    let mut payload = sample_booking_payload();
    payload.party_size = 12;

    let err = client.submit_booking(&payload).await.unwrap_err();
    match &err {
        Error::Response { status, message } => {
            assert_eq!(*status, 409);
            assert_eq!(message.as_deref(), Some("That date is fully booked"));
        },
        other => panic!("expected response error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_gets_generic_message() {
    let (base_url, _) = start_stub_cms().await;
    let client = SubmissionClient::new(&CmsEndpoint::Live(base_url));

    let err = client.submit_contact(&contact_payload()).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(err.user_message(), "Failed to send message");
}

#[tokio::test]
async fn test_live_newsletter() {
    let (base_url, _) = start_stub_cms().await;
    let client = SubmissionClient::new(&CmsEndpoint::Live(base_url));

    let result = client.subscribe_newsletter("  guest@example.com ").await.unwrap();
    assert_eq!(result.message, "Subscribed guest@example.com");
}

#[tokio::test]
async fn test_unreachable_cms_fails_submissions() {
    let client = SubmissionClient::new(&CmsEndpoint::Live(UNREACHABLE_CMS.to_string()));

    let err = client.submit_booking(&sample_booking_payload()).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_disabled_submissions_never_touch_network() {
    let client = SubmissionClient::new(&CmsEndpoint::Disabled);
    assert!(client.is_demo());

    let booking = client.submit_booking(&sample_booking_payload()).await.unwrap();
    let contact = client.submit_contact(&contact_payload()).await.unwrap();
    let newsletter = client.subscribe_newsletter("guest@example.com").await.unwrap();

    for result in [&booking, &contact, &newsletter] {
        assert!(result.success);
        assert!(result.is_demo());
    }
    assert!(booking.id.is_some());
    assert!(contact.id.is_none());
}
