//! Configuration module for Floral Tours
//!
//! This module handles loading and validating configuration from environment
//! variables, providing strongly-typed configuration structures for the
//! gateway server and the CMS clients.

use envconfig::Envconfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cms::CmsEndpoint;
use crate::error::{Error, Result};

/// Main configuration structure for Floral Tours
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct Config {
    /// Server configuration
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub server: ServerConfig,

    /// CMS configuration
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub cms: CmsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct ServerConfig {
    /// Host to bind to
    #[envconfig(from = "HOST", default = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[envconfig(from = "PORT", default = "8080")]
    pub port: u16,

    /// Log level
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,

    /// Environment (development, staging, production)
    #[envconfig(from = "ENVIRONMENT", default = "development")]
    pub environment: String,

    /// Request timeout in seconds
    #[envconfig(from = "REQUEST_TIMEOUT_SECS", default = "30")]
    pub request_timeout_secs: u64,

    /// Shutdown timeout in seconds
    #[envconfig(from = "SHUTDOWN_TIMEOUT_SECS", default = "30")]
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// CMS configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct CmsConfig {
    /// `live` to talk to the CMS, `disabled` for fallback catalog and demo submissions
    #[envconfig(from = "CMS_MODE", default = "live")]
    pub mode: String,

    /// REST root of the WordPress installation
    #[envconfig(from = "CMS_BASE_URL", default = "http://floral-kingdom-headless.local/wp-json")]
    pub base_url: String,
}

impl CmsConfig {
    /// Resolve the configured mode into an endpoint
    pub fn endpoint(&self) -> Result<CmsEndpoint> {
        match self.mode.trim().to_lowercase().as_str() {
            "live" => {
                let base_url = self.base_url.trim().trim_end_matches('/');
                if base_url.is_empty() {
                    return Err(Error::config("CMS base URL cannot be empty in live mode"));
                }
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    return Err(Error::config(format!(
                        "CMS base URL must start with http:// or https://, got {}",
                        self.masked_url()
                    )));
                }
                Ok(CmsEndpoint::Live(base_url.to_string()))
            },
            "disabled" => Ok(CmsEndpoint::Disabled),
            other => Err(Error::config(format!(
                "Unknown CMS mode '{}', expected 'live' or 'disabled'",
                other
            ))),
        }
    }

    /// Mask credentials in the URL for logging
    pub fn masked_url(&self) -> String {
        if let (Some(at_pos), Some(scheme_end)) = (self.base_url.find('@'), self.base_url.find("://")) {
            if at_pos > scheme_end {
                let start = &self.base_url[..scheme_end + 3];
                let end = &self.base_url[at_pos..];
                return format!("{}***{}", start, end);
            }
        }
        self.base_url.clone()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenv::dotenv().ok();

        Config::init_from_env().map_err(Error::from)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config("Server port cannot be 0"));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(Error::config("Request timeout must be at least 1 second"));
        }

        self.cms.endpoint()?;

        Ok(())
    }

    /// Log configuration (with sensitive data masked)
    pub fn log_config(&self) {
        tracing::info!(
            server_address = %self.server.address(),
            environment = %self.server.environment,
            log_level = %self.server.log_level,
            "Server configuration"
        );

        tracing::info!(
            mode = %self.cms.mode,
            base_url = %self.cms.masked_url(),
            "CMS configuration"
        );
    }
}
