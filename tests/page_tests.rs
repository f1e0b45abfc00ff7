//! End-to-end tests of the router against a mocked SQL API.
//!
//! The upstream API is mocked with mockito; timeouts use a local axum server
//! whose handler sleeps past the client timeout.
//!
//! Run with: cargo test --test page_tests
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header::CACHE_CONTROL, HeaderMap, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use sample_container::api::ApiClient;
use sample_container::config::{AppConfig, CACHE_CONTROL_DYNAMIC, CACHE_CONTROL_STATIC};
use sample_container::hostname;
use sample_container::templates::embedded_templates;
use sample_container::{create_router, AppState};

const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Builds the application the same way main does, with explicit API settings.
fn build_app(base_url: Option<String>, timeout_seconds: u64, proxy: bool) -> Router {
    let mut config = AppConfig::default();
    config.api.base_url = base_url;
    config.api.timeout_seconds = timeout_seconds;
    config.api.proxy = proxy;
    config.paths.static_dir = STATIC_DIR.to_string();

    let tera = embedded_templates().expect("embedded templates");
    let api = ApiClient::new(&config.api).expect("api client");
    create_router(AppState::new(config, tera, api))
}

async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn mock_json(server: &mut mockito::ServerGuard, path: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Start an upstream that answers every request after `delay`.
async fn spawn_slow_upstream(delay: Duration) -> String {
    let app = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        r#"{"health":"late"}"#
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn index_renders_placeholders_without_api_url() {
    let (status, headers, body) = get(build_app(None, 5, false), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Healthcheck: N/A"), "body: {}", body);
    assert!(body.contains("SQL output: N/A"), "body: {}", body);
    assert!(body.contains("(not configured)"));
    assert_eq!(headers[CACHE_CONTROL], CACHE_CONTROL_DYNAMIC);
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn index_shows_healthcheck_value() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_json(&mut server, "/healthcheck", r#"{"health":"ok"}"#).await;

    let (status, _, body) = get(build_app(Some(server.url()), 5, false), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Healthcheck: ok"), "body: {}", body);
    // /sql is not mocked, mockito answers 501
    assert!(body.contains("SQL output: N/A"));
    mock.assert_async().await;
}

#[tokio::test]
async fn index_shows_sql_output_value() {
    let mut server = mockito::Server::new_async().await;
    let _health = mock_json(&mut server, "/healthcheck", r#"{"health":"OK"}"#).await;
    let mock = mock_json(&mut server, "/sql", r#"{"sql_output":"v1.2.3"}"#).await;

    let (_, _, body) = get(build_app(Some(server.url()), 5, false), "/").await;

    assert!(body.contains("Healthcheck: OK"));
    assert!(body.contains("SQL output: v1.2.3"), "body: {}", body);
    assert!(body.contains(&format!("Information retrieved from API {}", server.url())));
    mock.assert_async().await;
}

#[tokio::test]
async fn index_survives_malformed_json() {
    let mut server = mockito::Server::new_async().await;
    let _health = mock_json(&mut server, "/healthcheck", "{not json").await;
    let _sql = mock_json(&mut server, "/sql", r#"{"unexpected":"key"}"#).await;

    let (status, _, body) = get(build_app(Some(server.url()), 5, false), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Healthcheck: N/A"));
    assert!(body.contains("SQL output: N/A"));
    assert!(body.contains("class=\"unavailable\""));
}

#[tokio::test]
async fn index_survives_upstream_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _health = server
        .mock("GET", "/healthcheck")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let (status, _, body) = get(build_app(Some(server.url()), 5, false), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Healthcheck: N/A"));
}

#[tokio::test]
async fn index_completes_within_timeout_bound() {
    let upstream = spawn_slow_upstream(Duration::from_secs(30)).await;
    let app = build_app(Some(upstream), 1, false);

    let start = Instant::now();
    let (status, _, body) = get(app, "/").await;
    let elapsed = start.elapsed();

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Healthcheck: N/A"));
    assert!(body.contains("SQL output: N/A"));
    // Both calls run concurrently, so one timeout plus overhead
    assert!(elapsed < Duration::from_secs(4), "took {:?}", elapsed);
}

#[tokio::test]
async fn index_headings_show_resolved_hostname() {
    let expected = hostname::resolve_or_placeholder();

    let (_, _, body) = get(build_app(None, 5, false), "/").await;

    assert!(body.contains(&format!("Welcome to {}</h1>", expected)), "body: {}", body);
    assert!(body.contains(&format!("<h1>{}</h1>", expected)), "body: {}", body);
}

#[tokio::test]
async fn index_html_alias_serves_same_page() {
    let (status, _, body) = get(build_app(None, 5, false), "/index.html").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Healthcheck: N/A"));
}

#[tokio::test]
async fn health_returns_ok_without_upstream() {
    let (status, _, body) = get(build_app(None, 5, false), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn info_page_lists_environment() {
    let app = build_app(Some("http://sqlapi:8080".to_string()), 5, false);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/info")
                .header("x-forwarded-for", "203.0.113.9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(body.contains(&hostname::resolve_or_placeholder()));
    assert!(body.contains(env!("CARGO_PKG_VERSION")));
    assert!(body.contains("http://sqlapi:8080"));
    assert!(body.contains("203.0.113.9"));
}

#[tokio::test]
async fn info_page_without_api_url() {
    let (status, _, body) = get(build_app(None, 5, false), "/info").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("not configured"));
}

#[tokio::test]
async fn static_healthcheck_page_is_served() {
    let (status, headers, body) = get(build_app(None, 5, false), "/healthcheck.html").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("OK"));
    assert_eq!(headers[CACHE_CONTROL], CACHE_CONTROL_STATIC);
}

#[tokio::test]
async fn missing_static_file_is_not_cached() {
    let (status, headers, _) = get(build_app(None, 5, false), "/nope.css").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!headers.contains_key(CACHE_CONTROL), "headers: {:?}", headers);
}

#[tokio::test]
async fn proxy_forwards_upstream_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_json(&mut server, "/sql", r#"{"sql_output":"v1.2.3"}"#).await;

    let (status, headers, body) = get(build_app(Some(server.url()), 5, true), "/api/sql").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(body, r#"{"sql_output":"v1.2.3"}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn proxy_labels_upstream_error_page_as_json() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/sql")
        .with_status(500)
        .with_header("content-type", "text/html")
        .with_body("<h1>boom</h1>")
        .create_async()
        .await;

    let (status, headers, body) = get(build_app(Some(server.url()), 5, true), "/api/sql").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(body, "<h1>boom</h1>");
}

#[tokio::test]
async fn proxy_without_api_url_is_unavailable() {
    let (status, _, body) = get(build_app(None, 5, true), "/api/healthcheck").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("API_URL is not configured"));
}

#[tokio::test]
async fn proxy_unreachable_upstream_is_bad_gateway() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = build_app(Some(format!("http://{}", addr)), 2, true);
    let (status, _, _) = get(app, "/api/healthcheck").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn proxy_routes_absent_when_disabled() {
    let (status, _, _) = get(build_app(Some("http://sqlapi:8080".to_string()), 5, false), "/api/sql").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
