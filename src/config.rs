//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file, applies the `API_URL`
//! environment override, and defines constants for HTTP cache headers, upstream
//! API timeouts, placeholders and default paths. `AppConfig` is the root
//! configuration struct; every section has defaults so the container can start
//! without a config file.

use std::path::Path;
use std::time::Duration;

use const_format::formatcp;
use serde::{Deserialize, Serialize};

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Static assets (CSS, favicon, healthcheck.html)
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 86400;

pub const CACHE_CONTROL_STATIC: &str = formatcp!("public, max-age={}", HTTP_CACHE_STATIC_MAX_AGE);

/// Rendered pages embed live upstream values and must never be cached
pub const CACHE_CONTROL_DYNAMIC: &str = "no-store";

// =============================================================================
// Upstream SQL API
// =============================================================================

/// Environment variable holding the SQL API base URL
pub const API_URL_ENV: &str = "API_URL";

/// Path of the upstream health endpoint
pub const HEALTHCHECK_PATH: &str = "/healthcheck";

/// Path of the upstream database version endpoint
pub const SQL_PATH: &str = "/sql";

/// Default total timeout for each upstream request
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 5;

/// Upper bound on the TCP connect phase of an upstream request
pub const API_CONNECT_TIMEOUT_SECS: u64 = 2;

// =============================================================================
// Placeholders
// =============================================================================

/// Rendered in place of an upstream value that could not be retrieved
pub const VALUE_PLACEHOLDER: &str = "N/A";

/// Rendered when the hostname cannot be resolved
pub const HOSTNAME_PLACEHOLDER: &str = "unknown-host";

// =============================================================================
// Server
// =============================================================================

/// Seconds to wait for in-flight connections on shutdown
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default template directory
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Default static file directory
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "sample_container=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Upstream SQL API settings
    pub api: ApiSettings,
    pub ui: UiConfig,
    pub paths: PathsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Settings for the external SQL API this page reports on
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL without trailing slash, e.g. `http://sqlapi:8080`
    pub base_url: Option<String>,
    /// Total timeout per upstream request in seconds
    pub timeout_seconds: u64,
    /// Serve `/api/healthcheck` and `/api/sql` by forwarding to the upstream
    pub proxy: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: DEFAULT_API_TIMEOUT_SECS,
            proxy: false,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        self.timeout()
            .min(Duration::from_secs(API_CONNECT_TIMEOUT_SECS))
    }
}

/// Presentation settings passed to every template as `config`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    pub site_title: String,
    pub description: String,
    pub author: String,
    /// Extra navigation link to the author's repositories
    pub github_url: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            site_title: "Sample container".to_string(),
            description: "Container info page".to_string(),
            author: "Jose Moreno".to_string(),
            github_url: Some("https://github.com/erjosito".to_string()),
        }
    }
}

/// Filesystem locations for templates and static assets
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Template directory; embedded templates are used when it does not exist
    pub templates: String,
    pub static_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES_DIR.to_string(),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(contents)?;
        config.api.base_url = normalize_base_url(config.api.base_url.take());
        config.validate()?;
        Ok(config)
    }

    /// Override `api.base_url` with the value of `API_URL`, if present.
    ///
    /// Empty values are ignored so that `API_URL=` does not clear a URL set in
    /// the config file.
    pub fn apply_api_url_override(&mut self, api_url: Option<String>) {
        if let Some(url) = normalize_base_url(api_url) {
            self.api.base_url = Some(url);
        }
    }

    /// Read `API_URL` from the process environment once and apply it.
    pub fn apply_env(&mut self) {
        self.apply_api_url_override(std::env::var(API_URL_ENV).ok());
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trim whitespace and trailing slashes; treat empty strings as unset.
fn normalize_base_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().trim_end_matches('/').to_string())
        .filter(|u| !u.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
