//! Dump Bin API 라우트.
//!
//! # 엔드포인트
//!
//! - `GET /api/dumpbins` - 목록
//! - `POST /api/dumpbins` - 생성
//! - `PUT /api/dumpbins/{id}` - 수정
//! - `DELETE /api/dumpbins/{id}` - 삭제
//! - `POST /api/dumpbins/{id}/contribute` - 적립/인출

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use budget_core::DumpBin;
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::CurrentUser;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::extract::{Path, ValidatedJson};
use crate::repository::{AmountInput, DumpBinInput, DumpBinRepository, DumpBinUpdate};
use crate::state::AppState;

/// GET /api/dumpbins
#[utoipa::path(
    get,
    path = "/api/dumpbins",
    responses(
        (status = 200, description = "Dump Bin 목록", body = Vec<DumpBin>),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dumpbins"
)]
pub async fn list_dump_bins(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<DumpBin>>> {
    let mut conn = state.db.acquire().await?;
    let bins = DumpBinRepository::list(&mut conn, user.id).await?;

    debug!(user_id = user.id, count = bins.len(), "Listed dump bins");
    Ok(Json(bins))
}

/// POST /api/dumpbins
#[utoipa::path(
    post,
    path = "/api/dumpbins",
    request_body = DumpBinInput,
    responses(
        (status = 201, description = "생성됨", body = DumpBin),
        (status = 401, description = "인증 실패", body = ApiErrorResponse),
        (status = 422, description = "입력 검증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dumpbins"
)]
pub async fn create_dump_bin(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(input): ValidatedJson<DumpBinInput>,
) -> ApiResult<(StatusCode, Json<DumpBin>)> {
    let mut tx = state.db.begin().await?;
    let bin = DumpBinRepository::create(&mut tx, user.id, &input).await?;
    tx.commit().await?;

    info!(user_id = user.id, dump_bin_id = bin.id, "Dump bin created");
    Ok((StatusCode::CREATED, Json(bin)))
}

/// PUT /api/dumpbins/{id}
#[utoipa::path(
    put,
    path = "/api/dumpbins/{id}",
    params(("id" = i64, Path, description = "Dump Bin ID")),
    request_body = DumpBinUpdate,
    responses(
        (status = 200, description = "수정됨", body = DumpBin),
        (status = 404, description = "없음", body = ApiErrorResponse),
        (status = 422, description = "입력 검증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dumpbins"
)]
pub async fn update_dump_bin(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<DumpBinUpdate>,
) -> ApiResult<Json<DumpBin>> {
    let mut tx = state.db.begin().await?;
    let bin = DumpBinRepository::update(&mut tx, user.id, id, &input).await?;
    tx.commit().await?;

    info!(user_id = user.id, dump_bin_id = id, "Dump bin updated");
    Ok(Json(bin))
}

/// DELETE /api/dumpbins/{id}
///
/// 대상이 없어도 204를 반환합니다.
#[utoipa::path(
    delete,
    path = "/api/dumpbins/{id}",
    params(("id" = i64, Path, description = "Dump Bin ID")),
    responses(
        (status = 204, description = "삭제됨"),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dumpbins"
)]
pub async fn delete_dump_bin(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut tx = state.db.begin().await?;
    let deleted = DumpBinRepository::delete(&mut tx, user.id, id).await?;
    tx.commit().await?;

    info!(user_id = user.id, dump_bin_id = id, deleted, "Dump bin delete");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/dumpbins/{id}/contribute
#[utoipa::path(
    post,
    path = "/api/dumpbins/{id}/contribute",
    params(("id" = i64, Path, description = "Dump Bin ID")),
    request_body = AmountInput,
    responses(
        (status = 200, description = "적립 후 상태", body = DumpBin),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dumpbins"
)]
pub async fn contribute(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<AmountInput>,
) -> ApiResult<Json<DumpBin>> {
    let mut tx = state.db.begin().await?;
    let bin = DumpBinRepository::contribute(&mut tx, user.id, id, input.amount).await?;
    tx.commit().await?;

    info!(
        user_id = user.id,
        dump_bin_id = id,
        amount = input.amount,
        current_amount = bin.current_amount,
        "Dump bin contribution"
    );
    Ok(Json(bin))
}

/// Dump Bin 라우터.
pub fn dump_bins_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_dump_bins).post(create_dump_bin))
        .route("/{id}", put(update_dump_bin).delete(delete_dump_bin))
        .route("/{id}/contribute", post(contribute))
}
