//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/register`, `/api/token`, `/api/user` - 인증
//! - `/api/dumpbins` - 저축 통
//! - `/api/debts` - 부채
//! - `/api/categories`, `/api/items` - 예산 카테고리와 배분 항목
//! - `/api/analytics` - 순자산, 수입 배분
//! - `/api-docs/openapi.json` - OpenAPI 스펙
//! - 그 외 - 정적 프론트엔드 번들

pub mod analytics;
pub mod auth;
pub mod categories;
pub mod debts;
pub mod dump_bins;
pub mod frontend;
pub mod health;

pub use analytics::{analytics_router, AllocatorRequest};
pub use auth::{auth_router, RegisterRequest, RegisterResponse};
pub use categories::{categories_router, items_router};
pub use debts::debts_router;
pub use dump_bins::dump_bins_router;
pub use frontend::frontend_service;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    Router,
};
use budget_core::{AppConfig, BudgetError};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::openapi::openapi_router;
use crate::state::AppState;

/// 요청 타임아웃
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `/api` 하위 라우터.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(auth_router())
        .nest("/dumpbins", dump_bins_router())
        .nest("/debts", debts_router())
        .nest("/categories", categories_router())
        .nest("/items", items_router())
        .nest("/analytics", analytics_router())
        .fallback(api_not_found)
}

/// 매칭되지 않은 `/api/*` 경로.
async fn api_not_found() -> ApiError {
    BudgetError::NotFound("API 경로".to_string()).into()
}

/// 전체 애플리케이션 라우터.
///
/// API, 헬스 체크, OpenAPI 문서를 조합하고 번들 디렉터리가 있으면 정적 폴백을 붙입니다.
pub fn create_router(state: Arc<AppState>, config: &AppConfig) -> Router {
    let router = Router::new()
        .nest("/health", health_router())
        .nest("/api", create_api_router())
        .merge(openapi_router())
        .with_state(state);

    let router = match frontend_service(&config.frontend) {
        Some(service) => router.fallback_service(service),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(cors_layer(&config.server.cors_origins))
}

/// CORS 레이어.
///
/// origin 목록이 비어 있으면 개발 모드로 간주하여 모든 origin을 허용합니다.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let allow_origin = if parsed.is_empty() {
        if !origins.is_empty() {
            warn!("CORS origins configured but none are valid, allowing any");
        }
        AllowOrigin::any()
    } else {
        info!("CORS configured with {} allowed origins", parsed.len());
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}
