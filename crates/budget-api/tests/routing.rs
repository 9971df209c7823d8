//! 헬스 체크, API 404, OpenAPI, 정적 프론트엔드 폴백.

mod common;

use axum::http::{Method, StatusCode};
use budget_core::AppConfig;
use common::TestApp;

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, body) = app.request(Method::GET, "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"]["database"]["status"], "up");
}

#[tokio::test]
async fn test_unknown_api_path_is_json_404() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(Method::GET, "/api/does-not-exist", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_openapi_served() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/dumpbins"].is_object());
}

#[tokio::test]
async fn test_frontend_fallback() {
    let dist = tempfile::tempdir().unwrap();
    std::fs::write(dist.path().join("index.html"), "<html>budget</html>").unwrap();
    std::fs::write(dist.path().join("app.js"), "console.log('hi')").unwrap();

    let mut config = AppConfig::default();
    config.frontend.dist_dir = dist.path().to_path_buf();
    let app = TestApp::with_config(config).await;

    let (status, body) = app.request(Method::GET, "/app.js", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "console.log('hi')");

    // 클라이언트 라우트는 index.html로
    let (status, body) = app.request(Method::GET, "/budget/weekly", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>budget</html>");

    // API 경로는 폴백되지 않음
    let (status, _) = app.request(Method::GET, "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_without_bundle_unknown_path_is_404() {
    let app = TestApp::new().await;

    let (status, _) = app.request(Method::GET, "/some/page", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
