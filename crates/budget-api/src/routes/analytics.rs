//! 분석 API 라우트.
//!
//! - `GET /api/analytics/net-worth` - 순자산 요약
//! - `POST /api/analytics/allocator` - 주간 수입 배분

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use budget_core::{Allocation, NetWorth};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::auth::CurrentUser;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::extract::ValidatedJson;
use crate::repository::AnalyticsRepository;
use crate::state::AppState;

/// 배분 계산 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AllocatorRequest {
    /// 주간 수입
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "non_negative"))]
    pub income: Decimal,
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("range"));
    }
    Ok(())
}

/// GET /api/analytics/net-worth
#[utoipa::path(
    get,
    path = "/api/analytics/net-worth",
    responses(
        (status = 200, description = "순자산 요약", body = NetWorth),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "analytics"
)]
pub async fn net_worth(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<NetWorth>> {
    let mut conn = state.db.acquire().await?;
    let summary = AnalyticsRepository::net_worth(&mut conn, user.id).await?;

    debug!(user_id = user.id, net_worth = summary.net_worth, "Net worth computed");
    Ok(Json(summary))
}

/// POST /api/analytics/allocator
#[utoipa::path(
    post,
    path = "/api/analytics/allocator",
    request_body = AllocatorRequest,
    responses(
        (status = 200, description = "배분 결과", body = Allocation),
        (status = 422, description = "음수 수입", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "analytics"
)]
pub async fn allocator(
    CurrentUser(user): CurrentUser,
    ValidatedJson(request): ValidatedJson<AllocatorRequest>,
) -> Json<Allocation> {
    debug!(user_id = user.id, income = %request.income, "Allocating income");
    Json(Allocation::split(request.income))
}

/// 분석 라우터.
pub fn analytics_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/net-worth", get(net_worth))
        .route("/allocator", post(allocator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_request_validation() {
        let ok: AllocatorRequest = serde_json::from_str(r#"{"income": 720000}"#).unwrap();
        assert!(ok.validate().is_ok());

        let zero: AllocatorRequest = serde_json::from_str(r#"{"income": 0}"#).unwrap();
        assert!(zero.validate().is_ok());

        let negative: AllocatorRequest = serde_json::from_str(r#"{"income": -5.5}"#).unwrap();
        assert!(negative.validate().is_err());
    }
}
