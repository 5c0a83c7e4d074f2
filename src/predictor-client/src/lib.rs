//! HTTP client for the startup success prediction service
//!
//! This crate talks to the service's reference-data endpoints and to
//! `POST /predict/explain`. Callers depend on the [`PredictorApi`] trait so the
//! form logic can be driven by an in-process fake in tests.

mod api;
mod client;
mod config;
pub mod http_client;

pub use api::PredictorApi;
pub use client::PredictorClient;
pub use config::ClientConfig;

/// Default prediction service URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the service URL
pub const API_URL_ENV: &str = "PREDICTOR_API_URL";

/// Error types for prediction service operations
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// The request never produced an HTTP response (DNS, refused, reset, timeout).
    #[error("unable to reach the prediction service at {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid response from prediction service: {0}")]
    InvalidResponse(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PredictorError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            PredictorError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, PredictorError::Transport { .. })
    }
}

/// Result type for prediction service operations
pub type Result<T> = std::result::Result<T, PredictorError>;
