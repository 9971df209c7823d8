//! Axum용 Bearer 토큰 인증 추출기.
//!
//! 토큰 검증 후 주체(사용자 이름)를 데이터베이스에서 다시 조회합니다.
//! 토큰이 유효해도 사용자가 삭제되었다면 인증에 실패합니다.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use budget_core::{BudgetError, User};
use tracing::debug;

use crate::error::ApiError;
use crate::repository::UserRepository;
use crate::state::AppState;

/// 인증된 사용자 추출기.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn list_debts(
///     State(state): State<Arc<AppState>>,
///     CurrentUser(user): CurrentUser,
/// ) -> ApiResult<Json<Vec<Debt>>> {
///     // user.id 범위에서만 조회
/// }
/// ```
///
/// 실패 원인(헤더 없음, 서명 불일치, 만료, 삭제된 사용자)과 무관하게
/// 항상 같은 401 응답으로 거부됩니다.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// `Authorization` 헤더에서 Bearer 토큰을 추출합니다.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            debug!("Missing or malformed Authorization header");
            ApiError::unauthorized()
        })?;

        let claims = state.jwt.validate(token).map_err(|e| {
            debug!(error = %e, "Token rejected");
            ApiError::unauthorized()
        })?;

        let user = UserRepository::find_by_username(&state.db, &claims.sub)
            .await?
            .ok_or_else(|| {
                debug!(subject = %claims.sub, "Token subject no longer exists");
                ApiError::from(BudgetError::UnknownSubject)
            })?;

        Ok(CurrentUser(user))
    }
}
