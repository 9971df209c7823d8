//! 통합 테스트 공용 헬퍼.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use budget_api::{create_router, state::create_test_state, AppState};
use budget_core::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

/// 인메모리 DB 위의 테스트 앱.
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

impl TestApp {
    /// 프론트엔드 번들 없이 앱을 구성합니다.
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.frontend.dist_dir = "does-not-exist/dist".into();
        Self::with_config(config).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let state = Arc::new(create_test_state().await.unwrap());
        let router = create_router(state.clone(), &config);
        Self { router, state }
    }

    /// 요청을 보내고 상태 코드와 JSON 본문(없으면 Null)을 반환합니다.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body))
            .await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body))
            .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// 회원가입 후 토큰을 발급받습니다.
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let (status, _) = self
            .request(
                Method::POST,
                "/api/register",
                None,
                Some(json!({"username": username, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        self.login(username, password).await.unwrap()
    }

    /// JSON 로그인. 실패하면 None.
    pub async fn login(&self, username: &str, password: &str) -> Option<String> {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/token",
                None,
                Some(json!({"username": username, "password": password})),
            )
            .await;
        if status != StatusCode::OK {
            return None;
        }
        body["access_token"].as_str().map(str::to_string)
    }
}
