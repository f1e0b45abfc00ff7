//! Page model combining the hostname with the upstream API values.
//!
//! Every upstream failure is recovered here: the affected field gets the
//! placeholder and the failure reason, and the page still renders.

use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::config::VALUE_PLACEHOLDER;
use crate::hostname;

/// One value retrieved from the upstream API.
#[derive(Debug, Clone, Serialize)]
pub struct FieldStatus {
    /// Upstream value, or the placeholder on failure
    pub value: String,
    pub ok: bool,
    /// Failure reason shown as a tooltip
    pub error: Option<String>,
}

impl FieldStatus {
    /// Convert an upstream result, substituting the placeholder on error.
    pub fn from_result(field_name: &str, result: Result<String, ApiError>) -> Self {
        match result {
            Ok(value) => Self {
                value,
                ok: true,
                error: None,
            },
            Err(e) => {
                match &e {
                    ApiError::ConfigMissing => {
                        tracing::debug!(field = field_name, "API_URL unset, rendering placeholder");
                    }
                    _ => {
                        tracing::warn!(field = field_name, kind = e.kind(), error = %e, "Upstream call failed");
                    }
                }
                Self {
                    value: VALUE_PLACEHOLDER.to_string(),
                    ok: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Everything the index page displays.
#[derive(Debug, Clone, Serialize)]
pub struct PageStatus {
    pub hostname: String,
    pub api_url: Option<String>,
    pub healthcheck: FieldStatus,
    pub sql_output: FieldStatus,
}

impl PageStatus {
    /// Resolve the hostname and query both upstream endpoints concurrently.
    pub async fn collect(api: &ApiClient) -> Self {
        let hostname = hostname::resolve_or_placeholder();
        let (health, sql) = tokio::join!(api.healthcheck(), api.sql_output());

        Self {
            hostname,
            api_url: api.base_url().map(str::to_string),
            healthcheck: FieldStatus::from_result("healthcheck", health),
            sql_output: FieldStatus::from_result("sql_output", sql),
        }
    }
}
