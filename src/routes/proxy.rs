//! Passthrough of `/api/healthcheck` and `/api/sql` to the SQL API.
//!
//! Normally an ingress routes `/api/*` to the API service. With `api.proxy`
//! enabled the container forwards these itself, keeping the index page links
//! working in setups without an ingress.

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::instrument;

use crate::api::ApiError;
use crate::config::{HEALTHCHECK_PATH, SQL_PATH};
use crate::state::AppState;

/// Forward `GET /api/healthcheck`.
#[instrument(name = "proxy::healthcheck", skip(state))]
pub async fn healthcheck(State(state): State<AppState>) -> Response {
    forward(&state, HEALTHCHECK_PATH).await
}

/// Forward `GET /api/sql`.
#[instrument(name = "proxy::sql", skip(state))]
pub async fn sql(State(state): State<AppState>) -> Response {
    forward(&state, SQL_PATH).await
}

async fn forward(state: &AppState, path: &str) -> Response {
    match state.api.proxy(path).await {
        // Always labelled JSON, even when the upstream sends an HTML error page
        Ok(upstream) => (
            upstream.status,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            upstream.body,
        )
            .into_response(),
        Err(ApiError::ConfigMissing) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": ApiError::ConfigMissing.to_string() })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(kind = e.kind(), error = %e, "Proxy request failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
