//! Test utilities for Floral Tours
//!
//! This module provides a scripted CMS transport, fixtures and a local stub
//! CMS server for testing.

use async_trait::async_trait;
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::cms::CmsTransport;
use crate::error::{Error, Result};
use crate::models::BookingPayload;

/// A REST root nothing listens on
pub const UNREACHABLE_CMS: &str = "http://127.0.0.1:9/wp-json";

/// Scripted answer for one path
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with this body
    Json(Value),
    /// Non-success status with this error body
    Status { status: u16, body: Value },
    /// Connection failure
    Unreachable,
}

/// A request seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory CMS transport answering from a path table
///
/// Paths without a scripted reply behave as unreachable.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for a path
    pub fn with_reply(self, path: &str, reply: MockReply) -> Self {
        self.replies.lock().unwrap().insert(path.to_string(), reply);
        self
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn respond(&self, method: &'static str, path: &str, body: Option<&Value>) -> Result<Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        match self.replies.lock().unwrap().get(path).cloned() {
            Some(MockReply::Json(value)) => Ok(value),
            Some(MockReply::Status { status, body }) => Err(Error::response(
                status,
                body.get("message").and_then(Value::as_str).map(str::to_string),
            )),
            Some(MockReply::Unreachable) | None => {
                Err(Error::transport(format!("connection refused: {}", path)))
            },
        }
    }
}

#[async_trait]
impl CmsTransport for MockTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        self.respond("GET", path, None)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        self.respond("POST", path, Some(body))
    }
}

/// A tour post shaped like `/wp/v2/tours?_embed` output
pub fn wp_tour_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "slug": format!("tour-{}", id),
        "title": { "rendered": title },
        "excerpt": { "rendered": "<p>Guided &amp; relaxed.</p>\n" },
        "content": { "rendered": "<p>Full day out with lunch.</p>" },
        "acf": {
            "tour_price": "R1,100",
            "tour_duration": "5 hours",
            "tour_category": "nature",
            "tour_gallery": [],
            "meeting_point": false
        },
        "_embedded": {
            "wp:featuredmedia": [ { "source_url": format!("https://cms.example/{}.jpg", id) } ]
        }
    })
}

/// A valid booking payload
pub fn sample_booking_payload() -> BookingPayload {
    BookingPayload {
        tour_id: 2,
        customer_name: "Thandi Mokoena".to_string(),
        customer_email: "thandi@example.co.za".to_string(),
        customer_phone: "+27 82 555 0100".to_string(),
        booking_date: "2026-12-01".to_string(),
        party_size: 2,
        special_requests: "Vegetarian lunch".to_string(),
    }
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_stub_cms(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub CMS");
    let addr = listener.local_addr().expect("stub CMS address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{}/wp-json", addr)
}
