//! 회원가입, 로그인, 토큰 검증 흐름.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use budget_api::auth::Claims;
use budget_api::repository::UserRepository;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/register",
            None,
            Some(json!({"username": "alice", "password": "pw1"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ok"], true);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/token",
            None,
            Some(json!({"username": "alice", "password": "pw1"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = app.get("/api/user", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert!(body["id"].as_i64().unwrap() > 0);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_with_oauth2_form() {
    let app = TestApp::new().await;
    app.register_and_login("alice", "pw1").await;

    let form = "username=alice&password=pw1&grant_type=password";
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().is_some());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let app = TestApp::new().await;
    app.register_and_login("alice", "pw1").await;

    let (wrong_status, wrong_body) = app
        .request(
            Method::POST,
            "/api/token",
            None,
            Some(json!({"username": "alice", "password": "wrong"})),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .request(
            Method::POST,
            "/api/token",
            None,
            Some(json!({"username": "nobody", "password": "wrong"})),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["message"], unknown_body["message"]);
}

#[tokio::test]
async fn test_duplicate_username() {
    let app = TestApp::new().await;
    app.register_and_login("alice", "pw1").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/register",
            None,
            Some(json!({"username": "alice", "password": "other"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE_USERNAME");
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    for payload in [
        json!({"username": "al", "password": "pw"}),
        json!({"username": "has space", "password": "pw"}),
        json!({"username": "alice", "password": ""}),
        json!({"username": "alice"}),
    ] {
        let (status, body) = app
            .request(Method::POST, "/api/register", None, Some(payload))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_protected_routes_require_bearer() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/api/dumpbins", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let request = Request::builder()
        .uri("/api/user")
        .header(header::AUTHORIZATION, "Basic YWxpY2U6cHcx")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response.headers().get(header::WWW_AUTHENTICATE).unwrap();
    assert_eq!(challenge, "Bearer");

    let (status, _) = app.get("/api/user", "not.a.jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "pw1").await;
    let claims = app.state.jwt.validate(&token).unwrap();

    let expired = app
        .state
        .jwt
        .sign(&Claims::new(claims.uid, "alice", -10))
        .unwrap();

    let (status, _) = app.get("/api/user", &expired).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deleted_user_token_rejected() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "pw1").await;
    let claims = app.state.jwt.validate(&token).unwrap();

    let deleted = UserRepository::delete(&app.state.db, claims.uid)
        .await
        .unwrap();
    assert!(deleted);

    let (status, body) = app.get("/api/user", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 잘못된 토큰과 구분되지 않음
    let (_, invalid_body) = app.get("/api/user", "not.a.jwt").await;
    assert_eq!(body["message"], invalid_body["message"]);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "pw1").await;
    let claims = app.state.jwt.validate(&token).unwrap();

    let forged = budget_api::auth::JwtConfig::new("another-secret-another-secret-xx", 30)
        .sign(&Claims::new(claims.uid, "alice", 30))
        .unwrap();

    let (status, _) = app.get("/api/user", &forged).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
