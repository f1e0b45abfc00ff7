//! HTTP route handlers for the web interface.
//!
//! Rendered pages are never cached since they embed live upstream values;
//! static assets get a long Cache-Control. Anything that is not a page route
//! falls through to the static file directory, which is how
//! `/healthcheck.html` and `/styles.css` are served.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod home;
pub mod info;
pub mod proxy;

use axum::{middleware, response::Response, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_DYNAMIC, CACHE_CONTROL_STATIC};
use crate::http::static_files::create_static_service;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Long-lived Cache-Control for static files that were actually found.
fn static_cache_control(response: &Response) -> Option<HeaderValue> {
    response
        .status()
        .is_success()
        .then(|| HeaderValue::from_static(CACHE_CONTROL_STATIC))
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Pages - always fresh, values come from the upstream API on each view
    let page_routes = Router::new()
        .route("/", get(home::index))
        .route("/index.html", get(home::index))
        .route("/info", get(info::info))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_DYNAMIC),
        ));

    // Health check - no caching, always fresh for liveness checks
    let health_routes = Router::new().route("/health", get(health::health));

    // Static files - fallback for every unmatched path, 404s are not cached
    let static_routes = Router::new()
        .fallback_service(create_static_service(&state.config.paths))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            static_cache_control,
        ));

    let mut router = Router::new().merge(page_routes).merge(health_routes);

    // API passthrough - only when no ingress handles /api/*
    if state.config.api.proxy {
        let proxy_routes = Router::new()
            .route("/api/healthcheck", get(proxy::healthcheck))
            .route("/api/sql", get(proxy::sql))
            .layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static(CACHE_CONTROL_DYNAMIC),
            ));
        router = router.merge(proxy_routes);
    }

    router
        .merge(static_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
