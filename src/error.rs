//! Page-level errors and their HTML responses.
//!
//! Upstream API failures never reach this type; they are recovered into
//! placeholders by [`crate::status`]. What remains are template faults.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::middleware::RequestId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// An [`AppError`] tagged with the request that produced it.
#[derive(Debug)]
pub struct AppErrorResponse {
    pub error: AppError,
    pub request_id: Option<RequestId>,
}

/// Attach a request ID to errors for log correlation.
pub trait ResultExt<T> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse>;
}

impl<T, E: Into<AppError>> ResultExt<T> for Result<T, E> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse> {
        self.map_err(|e| AppErrorResponse {
            error: e.into(),
            request_id: Some(request_id.clone()),
        })
    }
}

impl From<AppError> for AppErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error,
            request_id: None,
        }
    }
}

impl IntoResponse for AppErrorResponse {
    fn into_response(self) -> Response {
        let request_id = self
            .request_id
            .map(|id| id.0.to_string())
            .unwrap_or_default();
        tracing::error!(request_id = %request_id, error = ?self.error, "Request failed");

        error_page(StatusCode::INTERNAL_SERVER_ERROR, &request_id)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        AppErrorResponse::from(self).into_response()
    }
}

fn error_page(status: StatusCode, request_id: &str) -> Response {
    let body = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Error {}</title>
    <link rel="stylesheet" href="/styles.css">
</head>
<body>
    <div class="content">
        <div class="container">
            <h1>Error {}</h1>
            <p>Internal server error</p>
            <p><small>Request ID: {}</small></p>
            <a href="/">Return to homepage</a>
        </div>
    </div>
</body>
</html>"#,
        status.as_u16(),
        status.as_u16(),
        request_id
    );

    (status, Html(body)).into_response()
}
