//! 인증 API 라우트.
//!
//! # 엔드포인트
//!
//! - `POST /api/register` - 회원가입
//! - `POST /api/token` - 로그인 (JSON 또는 OAuth2 form)
//! - `GET /api/user` - 현재 사용자

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use budget_core::UserIdentity;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{self, CurrentUser, TokenResponse};
use crate::error::{ApiErrorResponse, ApiResult};
use crate::extract::{LoginForm, ValidatedJson};
use crate::state::AppState;

/// 회원가입 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// 회원가입 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub ok: bool,
    pub message: String,
}

/// POST /api/register
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "가입 완료", body = RegisterResponse),
        (status = 400, description = "중복된 사용자 이름", body = ApiErrorResponse),
        (status = 422, description = "입력 검증 실패", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    auth::register(&state.db, &request.username, &request.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            ok: true,
            message: "User created successfully".to_string(),
        }),
    ))
}

/// POST /api/token
#[utoipa::path(
    post,
    path = "/api/token",
    request_body(
        content = crate::extract::LoginRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "토큰 발급", body = TokenResponse),
        (status = 401, description = "자격증명 불일치", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    LoginForm(request): LoginForm,
) -> ApiResult<Json<TokenResponse>> {
    let user = auth::authenticate(&state.db, &request.username, &request.password).await?;
    let token = state.jwt.issue(&user)?;

    info!(user_id = user.id, "Token issued");
    Ok(Json(token))
}

/// GET /api/user
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "현재 사용자", body = UserIdentity),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserIdentity> {
    Json(user.identity())
}

/// 인증 라우터.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(login))
        .route("/user", get(current_user))
}
