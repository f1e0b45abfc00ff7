//! HTTP client wrapper for the SQL API.

use std::time::Duration;

use axum::body::Bytes;
use http::StatusCode;
use tracing::{debug, instrument};

use super::{parse_body, ApiError, HealthResponse, SqlResponse};
use crate::config::{ApiSettings, HEALTHCHECK_PATH, SQL_PATH};

/// SQL API client with a bounded per-request timeout.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    /// Base URL without trailing slash, `None` when `API_URL` is unset
    base_url: Option<String>,
    timeout: Duration,
}

/// Raw upstream response, forwarded as-is by the passthrough routes.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ApiClient {
    /// Create a client from the `[api]` settings.
    pub fn new(settings: &ApiSettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .connect_timeout(settings.connect_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: settings
                .base_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
            timeout: settings.timeout(),
        })
    }

    /// The configured base URL, if any
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the `health` field from `GET /healthcheck`.
    pub async fn healthcheck(&self) -> Result<String, ApiError> {
        let response: HealthResponse = self.fetch_json(HEALTHCHECK_PATH).await?;
        Ok(response.health)
    }

    /// Fetch the `sql_output` field from `GET /sql`.
    pub async fn sql_output(&self) -> Result<String, ApiError> {
        let response: SqlResponse = self.fetch_json(SQL_PATH).await?;
        Ok(response.sql_output)
    }

    /// Forward a GET to the upstream and return its status and raw body bytes
    /// without interpreting them.
    #[instrument(name = "api::proxy", skip(self))]
    pub async fn proxy(&self, path: &str) -> Result<UpstreamResponse, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.send(&url).await?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.network_error(&url, e))?;

        Ok(UpstreamResponse { status, body })
    }

    /// GET a path and decode a successful body as `T`.
    #[instrument(name = "api::fetch_json", skip(self))]
    async fn fetch_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self
            .send(&url)
            .await?
            .error_for_status()
            .map_err(|e| self.network_error(&url, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| self.network_error(&url, e))?;
        debug!(%url, bytes = body.len(), "Upstream response received");
        parse_body(&url, &body)
    }

    /// Join the base URL with an endpoint path.
    fn endpoint(&self, path: &str) -> Result<String, ApiError> {
        let base = self.base_url.as_deref().ok_or(ApiError::ConfigMissing)?;
        Ok(format!("{}/{}", base, path.trim_start_matches('/')))
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| self.network_error(url, e))
    }

    fn network_error(&self, url: &str, source: reqwest::Error) -> ApiError {
        if source.is_timeout() {
            debug!(%url, timeout_secs = self.timeout.as_secs(), "Upstream request timed out");
        }
        ApiError::Network {
            url: url.to_string(),
            source,
        }
    }
}
