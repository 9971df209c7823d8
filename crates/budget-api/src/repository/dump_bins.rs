//! Dump Bin 저장소.
//!
//! 모든 쿼리는 `user_id = owner_id` 조건으로 범위가 제한됩니다.
//! 타인 소유 레코드는 존재하지 않는 레코드와 동일하게 취급됩니다.

use budget_core::{apply_contribution, BudgetError, BudgetResult, DumpBin};
use serde::Deserialize;
use sqlx::SqliteConnection;
use utoipa::ToSchema;
use validator::Validate;

/// Dump Bin 생성 입력.
///
/// `current_amount`는 0, `is_dump_bin`은 true가 기본값입니다.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DumpBinInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub target_amount: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub current_amount: i64,
    #[serde(default = "default_is_dump_bin")]
    pub is_dump_bin: bool,
}

fn default_is_dump_bin() -> bool {
    true
}

/// Dump Bin 수정 입력 (전체 교체).
///
/// 모든 필드가 필수이며, 빠진 필드가 있으면 422로 거부됩니다.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DumpBinUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub target_amount: i64,
    #[validate(range(min = 0))]
    pub current_amount: i64,
    pub is_dump_bin: bool,
}

/// 적립/인출 금액 입력.
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct AmountInput {
    pub amount: i64,
}

const SELECT_COLUMNS: &str =
    "id, user_id, name, target_amount, current_amount, is_dump_bin, created_at";

/// Dump Bin Repository
pub struct DumpBinRepository;

impl DumpBinRepository {
    /// 소유자의 Dump Bin 목록 (id 순).
    pub async fn list(conn: &mut SqliteConnection, owner_id: i64) -> BudgetResult<Vec<DumpBin>> {
        let rows = sqlx::query_as::<_, DumpBin>(&format!(
            "SELECT {} FROM dump_bins WHERE user_id = ?1 ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(conn)
        .await?;

        Ok(rows)
    }

    /// 단건 조회.
    pub async fn find(
        conn: &mut SqliteConnection,
        owner_id: i64,
        id: i64,
    ) -> BudgetResult<Option<DumpBin>> {
        let row = sqlx::query_as::<_, DumpBin>(&format!(
            "SELECT {} FROM dump_bins WHERE id = ?1 AND user_id = ?2",
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

        Ok(row)
    }

    /// 생성. 소유자는 호출자로 고정됩니다.
    pub async fn create(
        conn: &mut SqliteConnection,
        owner_id: i64,
        input: &DumpBinInput,
    ) -> BudgetResult<DumpBin> {
        let row = sqlx::query_as::<_, DumpBin>(&format!(
            r#"
            INSERT INTO dump_bins (user_id, name, target_amount, current_amount, is_dump_bin)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(owner_id)
        .bind(&input.name)
        .bind(input.target_amount)
        .bind(input.current_amount)
        .bind(input.is_dump_bin)
        .fetch_one(conn)
        .await?;

        Ok(row)
    }

    /// 전체 필드 교체.
    pub async fn update(
        conn: &mut SqliteConnection,
        owner_id: i64,
        id: i64,
        input: &DumpBinUpdate,
    ) -> BudgetResult<DumpBin> {
        sqlx::query_as::<_, DumpBin>(&format!(
            r#"
            UPDATE dump_bins
            SET name = ?3, target_amount = ?4, current_amount = ?5, is_dump_bin = ?6
            WHERE id = ?1 AND user_id = ?2
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(input.target_amount)
        .bind(input.current_amount)
        .bind(input.is_dump_bin)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| BudgetError::not_found("dump bin", id))
    }

    /// 삭제. 대상이 없으면 false (에러 아님).
    pub async fn delete(conn: &mut SqliteConnection, owner_id: i64, id: i64) -> BudgetResult<bool> {
        let result = sqlx::query("DELETE FROM dump_bins WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(owner_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 적립 (음수면 인출). 잔액은 0 아래로 내려가지 않습니다.
    pub async fn contribute(
        conn: &mut SqliteConnection,
        owner_id: i64,
        id: i64,
        amount: i64,
    ) -> BudgetResult<DumpBin> {
        let current = Self::find(&mut *conn, owner_id, id)
            .await?
            .ok_or_else(|| BudgetError::not_found("dump bin", id))?;

        let row = sqlx::query_as::<_, DumpBin>(&format!(
            "UPDATE dump_bins SET current_amount = ?3 WHERE id = ?1 AND user_id = ?2 RETURNING {}",
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .bind(apply_contribution(current.current_amount, amount))
        .fetch_one(conn)
        .await?;

        Ok(row)
    }
}
