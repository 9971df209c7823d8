//! 예산 카테고리 / 배분 항목 API 라우트.
//!
//! # 엔드포인트
//!
//! - `GET /api/categories` - 목록 (항목 포함)
//! - `POST /api/categories` - 생성
//! - `PUT /api/categories/{id}` - 수정
//! - `DELETE /api/categories/{id}` - 삭제 (항목 포함)
//! - `POST /api/categories/{id}/items` - 항목 추가
//! - `PUT /api/items/{id}` - 항목 수정
//! - `DELETE /api/items/{id}` - 항목 삭제

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use budget_core::{AllocationItem, Category, CategoryWithItems};
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::CurrentUser;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::extract::{Path, ValidatedJson};
use crate::repository::{AllocationItemInput, CategoryInput, CategoryRepository};
use crate::state::AppState;

/// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "카테고리 목록 (항목 포함)", body = Vec<CategoryWithItems>),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<CategoryWithItems>>> {
    let mut conn = state.db.acquire().await?;
    let categories = CategoryRepository::list_with_items(&mut conn, user.id).await?;

    debug!(user_id = user.id, count = categories.len(), "Listed categories");
    Ok(Json(categories))
}

/// POST /api/categories
///
/// 새 카테고리는 빈 항목 목록과 함께 반환됩니다.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryInput,
    responses(
        (status = 201, description = "생성됨", body = CategoryWithItems),
        (status = 422, description = "입력 검증 실패", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> ApiResult<(StatusCode, Json<CategoryWithItems>)> {
    let mut tx = state.db.begin().await?;
    let category = CategoryRepository::create(&mut tx, user.id, &input).await?;
    tx.commit().await?;

    info!(user_id = user.id, category_id = category.id, "Category created");
    Ok((
        StatusCode::CREATED,
        Json(CategoryWithItems::new(category, Vec::new())),
    ))
}

/// PUT /api/categories/{id}
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "카테고리 ID")),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "수정됨", body = CategoryWithItems),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> ApiResult<Json<CategoryWithItems>> {
    let mut tx = state.db.begin().await?;
    let category: Category = CategoryRepository::update(&mut tx, user.id, id, &input).await?;
    let items = CategoryRepository::items_for_category(&mut tx, user.id, id).await?;
    tx.commit().await?;

    info!(user_id = user.id, category_id = id, "Category updated");
    Ok(Json(CategoryWithItems::new(category, items)))
}

/// DELETE /api/categories/{id}
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "카테고리 ID")),
    responses((status = 204, description = "삭제됨 (소속 항목 포함)")),
    security(("bearer" = [])),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut tx = state.db.begin().await?;
    let deleted = CategoryRepository::delete(&mut tx, user.id, id).await?;
    tx.commit().await?;

    info!(user_id = user.id, category_id = id, deleted, "Category delete");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/categories/{id}/items
#[utoipa::path(
    post,
    path = "/api/categories/{id}/items",
    params(("id" = i64, Path, description = "카테고리 ID")),
    request_body = AllocationItemInput,
    responses(
        (status = 201, description = "생성됨", body = AllocationItem),
        (status = 404, description = "카테고리 없음", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "categories"
)]
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(category_id): Path<i64>,
    ValidatedJson(input): ValidatedJson<AllocationItemInput>,
) -> ApiResult<(StatusCode, Json<AllocationItem>)> {
    let mut tx = state.db.begin().await?;
    let item = CategoryRepository::create_item(&mut tx, user.id, category_id, &input).await?;
    tx.commit().await?;

    info!(user_id = user.id, category_id, item_id = item.id, "Allocation item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/{id}
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "항목 ID")),
    request_body = AllocationItemInput,
    responses(
        (status = 200, description = "수정됨", body = AllocationItem),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "categories"
)]
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<AllocationItemInput>,
) -> ApiResult<Json<AllocationItem>> {
    let mut tx = state.db.begin().await?;
    let item = CategoryRepository::update_item(&mut tx, user.id, id, &input).await?;
    tx.commit().await?;

    info!(user_id = user.id, item_id = id, "Allocation item updated");
    Ok(Json(item))
}

/// DELETE /api/items/{id}
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "항목 ID")),
    responses((status = 204, description = "삭제됨")),
    security(("bearer" = [])),
    tag = "categories"
)]
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut tx = state.db.begin().await?;
    let deleted = CategoryRepository::delete_item(&mut tx, user.id, id).await?;
    tx.commit().await?;

    info!(user_id = user.id, item_id = id, deleted, "Allocation item delete");
    Ok(StatusCode::NO_CONTENT)
}

/// 카테고리 라우터.
pub fn categories_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/{id}", put(update_category).delete(delete_category))
        .route("/{id}/items", post(create_item))
}

/// 배분 항목 라우터.
pub fn items_router() -> Router<Arc<AppState>> {
    Router::new().route("/{id}", put(update_item).delete(delete_item))
}
