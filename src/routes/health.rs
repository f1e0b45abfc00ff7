//! Liveness endpoint for container orchestration.
//!
//! Unlike the index page this never calls the SQL API, so a broken upstream
//! does not get the container restarted.

/// Health check handler.
pub async fn health() -> &'static str {
    "ok"
}
