//! Client for the external SQL API.
//!
//! The SQL API exposes two JSON endpoints this container reports on:
//! - `GET /healthcheck` returning `{"health": "..."}`
//! - `GET /sql` returning `{"sql_output": "..."}`
//!
//! Fetching and decoding are separate steps so callers can tell a network
//! failure from a malformed body. Both map to [`ApiError`], and the render
//! layer decides which placeholder to show.

mod client;

use serde::Deserialize;

pub use client::{ApiClient, UpstreamResponse};

/// Body of `GET /healthcheck`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub health: String,
}

/// Body of `GET /sql`.
#[derive(Debug, Clone, Deserialize)]
pub struct SqlResponse {
    pub sql_output: String,
}

/// Errors from a single upstream call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API_URL is not configured")]
    ConfigMissing,

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ConfigMissing => "config_missing",
            ApiError::Network { .. } => "network",
            ApiError::Parse { .. } => "parse",
        }
    }
}

/// Decode an upstream body into a typed response.
pub fn parse_body<T>(url: &str, body: &str) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|source| ApiError::Parse {
        url: url.to_string(),
        source,
    })
}
