//! Health, readiness and docs endpoints

mod common;

use axum::http::StatusCode;
use common::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app("http://127.0.0.1:9", None);

    let (status, body) = call(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_ready_when_backend_healthy() {
    let backend = MockBackend::new().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend.server)
        .await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(&app, get("/ready", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::Value::String("ready".to_string()));
}

#[tokio::test]
async fn test_not_ready_when_backend_down() {
    let app = test_app("http://127.0.0.1:9", None);

    let (status, body) = call(&app, get("/ready", None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, serde_json::Value::String("not_ready".to_string()));
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let app = test_app("http://127.0.0.1:9", None);

    let (status, _) = call(&app, get("/metrics", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app("http://127.0.0.1:9", None);

    let (status, body) = call(&app, get("/api-docs/openapi.json", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/members/{id}"].is_object());
    assert!(body["paths"]["/api/auth/login"].is_object());
}
