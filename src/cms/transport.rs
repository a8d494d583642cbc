//! HTTP transport to the CMS REST API
//!
//! [`CmsTransport`] is the seam between the clients and the network: the
//! clients only see JSON values and [`Error`] variants, never reqwest types.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::Instrument;

use crate::cms_span;
use crate::error::{Error, Result};

/// JSON request/response access to the CMS
///
/// Implementations report unreachable hosts as [`Error::Transport`] and
/// non-success statuses as [`Error::Response`], carrying the `message`
/// field of the error body when there is one.
#[async_trait]
pub trait CmsTransport: Send + Sync {
    /// GET a path relative to the REST root
    async fn get_json(&self, path: &str) -> Result<Value>;

    /// POST a JSON body to a path relative to the REST root
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        tracing::Span::current().record("status", status.as_u16());

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .filter(|m| !m.trim().is_empty());
            return Err(Error::response(status.as_u16(), message));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CmsTransport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        async {
            let response = self.client.get(&url).send().await?;
            Self::read_json(response).await
        }
        .instrument(cms_span!("GET", path))
        .await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);
        async {
            let response = self.client.post(&url).json(body).send().await?;
            Self::read_json(response).await
        }
        .instrument(cms_span!("POST", path))
        .await
    }
}
