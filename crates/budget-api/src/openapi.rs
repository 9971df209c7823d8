//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성하고
//! `/api-docs/openapi.json` 경로로 제공합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 요청/응답 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use budget_core::{
    Allocation, AllocationItem, Category, CategoryWithItems, Debt, DumpBin, NetWorth,
    NetWorthBreakdown, UserIdentity,
};

use crate::auth::TokenResponse;
use crate::error::ApiErrorResponse;
use crate::extract::LoginRequest;
use crate::repository::{
    AllocationItemInput, AmountInput, CategoryInput, DebtInput, DebtUpdate, DumpBinInput,
    DumpBinUpdate, PaymentInput,
};
use crate::routes::{
    AllocatorRequest, ComponentHealth, ComponentStatus, HealthResponse, RegisterRequest,
    RegisterResponse,
};

/// Budget API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Budget API",
        description = r#"
# 가계부 REST API

저축 통(Dump Bin), 부채, 예산 카테고리를 사용자별로 관리합니다.

## 인증

`POST /api/token`으로 발급받은 토큰을 `Authorization: Bearer <token>` 헤더에 포함하세요.
다른 사용자의 레코드는 존재하지 않는 레코드와 동일하게 404로 응답합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크"),
        (name = "auth", description = "회원가입, 로그인, 현재 사용자"),
        (name = "dumpbins", description = "저축 통"),
        (name = "debts", description = "부채"),
        (name = "categories", description = "예산 카테고리와 배분 항목"),
        (name = "analytics", description = "순자산, 수입 배분")
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            // ===== Common =====
            ApiErrorResponse,

            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Auth =====
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            TokenResponse,
            UserIdentity,

            // ===== Records =====
            DumpBin,
            DumpBinInput,
            DumpBinUpdate,
            AmountInput,
            Debt,
            DebtInput,
            DebtUpdate,
            PaymentInput,
            Category,
            CategoryInput,
            CategoryWithItems,
            AllocationItem,
            AllocationItemInput,

            // ===== Analytics =====
            NetWorth,
            NetWorthBreakdown,
            Allocation,
            AllocatorRequest,
        )
    ),
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::current_user,

        // ===== Dump Bins =====
        crate::routes::dump_bins::list_dump_bins,
        crate::routes::dump_bins::create_dump_bin,
        crate::routes::dump_bins::update_dump_bin,
        crate::routes::dump_bins::delete_dump_bin,
        crate::routes::dump_bins::contribute,

        // ===== Debts =====
        crate::routes::debts::list_debts,
        crate::routes::debts::create_debt,
        crate::routes::debts::update_debt,
        crate::routes::debts::delete_debt,
        crate::routes::debts::pay_debt,

        // ===== Categories =====
        crate::routes::categories::list_categories,
        crate::routes::categories::create_category,
        crate::routes::categories::update_category,
        crate::routes::categories::delete_category,
        crate::routes::categories::create_item,
        crate::routes::categories::update_item,
        crate::routes::categories::delete_item,

        // ===== Analytics =====
        crate::routes::analytics::net_worth,
        crate::routes::analytics::allocator,
    )
)]
pub struct ApiDoc;

/// Bearer 토큰 보안 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI JSON 라우터.
///
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Budget API"));

        for path in [
            "/health/ready",
            "/api/register",
            "/api/token",
            "/api/user",
            "/api/dumpbins/{id}/contribute",
            "/api/debts/{id}/pay",
            "/api/categories/{id}/items",
            "/api/items/{id}",
            "/api/analytics/allocator",
        ] {
            assert!(json.contains(path), "missing path {}", path);
        }

        assert!(json.contains("bearer"));
    }
}
