//! Static file serving.
//!
//! Serves the configured static directory (stylesheet, favicon and the plain
//! `healthcheck.html` page for load balancers). Requests for a directory serve its
//! `index.html` if present.

use tower_http::services::ServeDir;

use crate::config::PathsConfig;

/// Create the static file service for the configured directory.
pub fn create_static_service(paths: &PathsConfig) -> ServeDir {
    if !std::path::Path::new(&paths.static_dir).is_dir() {
        tracing::warn!(dir = %paths.static_dir, "Static directory not found, static files will 404");
    }
    ServeDir::new(&paths.static_dir).append_index_html_on_directories(true)
}
