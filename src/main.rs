//! Sample container: a demo web page for container platforms.
//!
//! This is the application entry point. It loads configuration from a TOML
//! file and the `API_URL` environment variable, initializes tracing, sets up
//! templates and the SQL API client, and starts the HTTP server.

use std::path::Path;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sample_container::api::ApiClient;
use sample_container::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use sample_container::http::start_server;
use sample_container::templates::init_templates;
use sample_container::{create_router, AppState};

/// Sample container: shows the hostname and the status of a SQL API
#[derive(Parser, Debug)]
#[command(name = "sample-container", version, about)]
struct Args {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "sample_container=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override the HTTP listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration before tracing so the log format can be honoured
    let config_found = Path::new(&args.config).exists();
    let mut config = if config_found {
        AppConfig::load(&args.config)?
    } else {
        AppConfig::default()
    };
    config.apply_env();
    if let Some(port) = args.port {
        config.http.port = port;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if config_found {
        tracing::info!(path = %args.config, "Loaded configuration");
    } else {
        tracing::warn!(path = %args.config, "Config file not found, using defaults");
    }

    match config.api.base_url.as_deref() {
        Some(url) => tracing::info!(
            api_url = %url,
            timeout_secs = config.api.timeout_seconds,
            proxy = config.api.proxy,
            "SQL API configured"
        ),
        None => tracing::warn!("API_URL not set, API values will show placeholders"),
    }

    let tera = init_templates(&config.paths.templates)?;
    tracing::info!("Initialized templates");

    let api = ApiClient::new(&config.api)?;

    let http_config = config.http.clone();
    let state = AppState::new(config, tera, api);
    let app = create_router(state);

    start_server(app, &http_config).await?;

    Ok(())
}
