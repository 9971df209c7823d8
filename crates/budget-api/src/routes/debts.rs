//! 부채 API 라우트.
//!
//! # 엔드포인트
//!
//! - `GET /api/debts` - 목록
//! - `POST /api/debts` - 생성
//! - `PUT /api/debts/{id}` - 수정
//! - `DELETE /api/debts/{id}` - 삭제
//! - `POST /api/debts/{id}/pay` - 상환

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use budget_core::Debt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::CurrentUser;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::extract::{Path, ValidatedJson};
use crate::repository::{DebtInput, DebtRepository, DebtUpdate, PaymentInput};
use crate::state::AppState;

/// GET /api/debts
#[utoipa::path(
    get,
    path = "/api/debts",
    responses(
        (status = 200, description = "부채 목록", body = Vec<Debt>),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "debts"
)]
pub async fn list_debts(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Debt>>> {
    let mut conn = state.db.acquire().await?;
    let debts = DebtRepository::list(&mut conn, user.id).await?;

    debug!(user_id = user.id, count = debts.len(), "Listed debts");
    Ok(Json(debts))
}

/// POST /api/debts
#[utoipa::path(
    post,
    path = "/api/debts",
    request_body = DebtInput,
    responses(
        (status = 201, description = "생성됨", body = Debt),
        (status = 422, description = "입력 검증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "debts"
)]
pub async fn create_debt(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(input): ValidatedJson<DebtInput>,
) -> ApiResult<(StatusCode, Json<Debt>)> {
    let mut tx = state.db.begin().await?;
    let debt = DebtRepository::create(&mut tx, user.id, &input).await?;
    tx.commit().await?;

    info!(user_id = user.id, debt_id = debt.id, "Debt created");
    Ok((StatusCode::CREATED, Json(debt)))
}

/// PUT /api/debts/{id}
#[utoipa::path(
    put,
    path = "/api/debts/{id}",
    params(("id" = i64, Path, description = "부채 ID")),
    request_body = DebtUpdate,
    responses(
        (status = 200, description = "수정됨", body = Debt),
        (status = 404, description = "없음", body = ApiErrorResponse),
        (status = 422, description = "입력 검증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "debts"
)]
pub async fn update_debt(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<DebtUpdate>,
) -> ApiResult<Json<Debt>> {
    let mut tx = state.db.begin().await?;
    let debt = DebtRepository::update(&mut tx, user.id, id, &input).await?;
    tx.commit().await?;

    info!(user_id = user.id, debt_id = id, "Debt updated");
    Ok(Json(debt))
}

/// DELETE /api/debts/{id}
#[utoipa::path(
    delete,
    path = "/api/debts/{id}",
    params(("id" = i64, Path, description = "부채 ID")),
    responses((status = 204, description = "삭제됨")),
    security(("bearer" = [])),
    tag = "debts"
)]
pub async fn delete_debt(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut tx = state.db.begin().await?;
    let deleted = DebtRepository::delete(&mut tx, user.id, id).await?;
    tx.commit().await?;

    info!(user_id = user.id, debt_id = id, deleted, "Debt delete");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/debts/{id}/pay
#[utoipa::path(
    post,
    path = "/api/debts/{id}/pay",
    params(("id" = i64, Path, description = "부채 ID")),
    request_body = PaymentInput,
    responses(
        (status = 200, description = "상환 후 상태", body = Debt),
        (status = 404, description = "없음", body = ApiErrorResponse),
        (status = 422, description = "금액이 0 이하", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "debts"
)]
pub async fn pay_debt(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<PaymentInput>,
) -> ApiResult<Json<Debt>> {
    let mut tx = state.db.begin().await?;
    let debt = DebtRepository::pay(&mut tx, user.id, id, input.amount).await?;
    tx.commit().await?;

    info!(
        user_id = user.id,
        debt_id = id,
        amount = input.amount,
        remaining_amount = debt.remaining_amount,
        "Debt payment"
    );
    Ok(Json(debt))
}

/// 부채 라우터.
pub fn debts_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_debts).post(create_debt))
        .route("/{id}", put(update_debt).delete(delete_debt))
        .route("/{id}/pay", post(pay_debt))
}
