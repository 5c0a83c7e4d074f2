//! HTTP client factory.
//!
//! Every client built here carries the same User-Agent, `tcp_nodelay` and a
//! bounded idle pool. Timeouts come from [`ClientConfig`]; there is no overall
//! request timeout unless one is configured.

use std::time::Duration;

use reqwest::Client;

use crate::{ClientConfig, PredictorError, Result};

/// User-Agent string for all HTTP requests
pub const USER_AGENT: &str = concat!("startup-predictor/", env!("CARGO_PKG_VERSION"));

/// Idle pooled connections are dropped after this long so DNS is re-resolved.
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Builds a client from the given configuration.
pub fn create_client(config: &ClientConfig) -> Result<Client> {
    let mut builder = create_client_builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| PredictorError::Client(e.to_string()))
}

/// Client builder with the shared defaults, for further customization.
pub fn create_client_builder() -> reqwest::ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .tcp_nodelay(true)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .pool_max_idle_per_host(4)
}
