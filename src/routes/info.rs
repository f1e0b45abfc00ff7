//! Environment info page handler.

use axum::{extract::State, http::HeaderMap, response::Html, Extension};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, AppErrorResponse, ResultExt};
use crate::hostname;
use crate::middleware::RequestId;
use crate::state::AppState;

/// Request headers shown on the info page, useful when debugging ingress setups
const DISPLAYED_HEADERS: [&str; 5] = [
    "host",
    "user-agent",
    "x-forwarded-for",
    "x-forwarded-proto",
    "x-forwarded-host",
];

#[derive(Debug, Serialize)]
struct HeaderRow {
    name: &'static str,
    value: String,
}

fn displayed_headers(headers: &HeaderMap) -> Vec<HeaderRow> {
    DISPLAYED_HEADERS
        .iter()
        .filter_map(|&name| {
            let value = headers.get(name)?.to_str().ok()?;
            Some(HeaderRow {
                name,
                value: value.to_string(),
            })
        })
        .collect()
}

/// Info page handler.
#[instrument(name = "info::info", skip_all)]
pub async fn info(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
) -> Result<Html<String>, AppErrorResponse> {
    let mut context = tera::Context::new();
    context.insert("config", &state.config.ui);
    context.insert("hostname", &hostname::resolve_or_placeholder());
    context.insert("version", env!("CARGO_PKG_VERSION"));
    context.insert("rendered_at", &chrono::Utc::now().to_rfc3339());
    context.insert("headers", &displayed_headers(&headers));
    if let Some(url) = state.api.base_url() {
        context.insert("api_url", url);
    }

    let html = state
        .tera
        .render("info.html", &context)
        .map_err(AppError::from)
        .with_request_id(&request_id)?;
    Ok(Html(html))
}
