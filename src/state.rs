//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::api::ApiClient;
use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the configuration (sourced once at startup, including `API_URL`),
/// the Tera template engine, and the SQL API client.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub api: ApiClient,
}

impl AppState {
    /// Creates a new application state from the given configuration, templates, and API client.
    pub fn new(config: AppConfig, tera: Tera, api: ApiClient) -> Self {
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            api,
        }
    }
}
