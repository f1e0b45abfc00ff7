//! Index page handler: hostname plus the SQL API status.

use axum::{extract::State, response::Html, Extension};
use tracing::instrument;

use crate::error::{AppError, AppErrorResponse, ResultExt};
use crate::middleware::RequestId;
use crate::state::AppState;
use crate::status::PageStatus;

/// Index page handler.
///
/// Upstream failures are rendered as placeholders, so this only fails when the
/// template itself cannot be rendered.
#[instrument(name = "home::index", skip(state, request_id))]
pub async fn index(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Html<String>, AppErrorResponse> {
    let status = PageStatus::collect(&state.api).await;

    let mut context = tera::Context::new();
    context.insert("config", &state.config.ui);
    context.insert("hostname", &status.hostname);
    context.insert("status", &status);

    let html = state
        .tera
        .render("index.html", &context)
        .map_err(AppError::from)
        .with_request_id(&request_id)?;
    Ok(Html(html))
}
