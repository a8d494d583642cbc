//! Floral Tours gateway
//!
//! Serves the tour catalog and forwards site form submissions to the
//! WordPress CMS, falling back to a bundled catalog and demo submissions
//! when the CMS is disabled.

use std::sync::Arc;

use floral_tours::{api, config::Config, logging, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Arc::new(Config::from_env()?);

    // Validate configuration
    config.validate()?;

    // Initialize logging/tracing
    logging::init_tracing(&config.server.log_level, &config.server.environment)?;

    // Log configuration (with sensitive data masked)
    config.log_config();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Floral Tours gateway");

    api::server::create_server(config).await?;

    tracing::info!("Floral Tours shutdown complete");
    Ok(())
}
