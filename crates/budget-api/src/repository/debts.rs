//! 부채 저장소.

use budget_core::{apply_payment, BudgetError, BudgetResult, Debt};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use sqlx::SqliteConnection;
use utoipa::ToSchema;
use validator::Validate;

/// 부채 생성 입력.
///
/// `remaining_amount`를 생략하면 `total_amount`로 채워집니다.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DebtInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub total_amount: i64,
    #[validate(range(min = 0))]
    pub remaining_amount: Option<i64>,
    /// 상환 목표일 (YYYY-MM-DD)
    pub target_date: Option<NaiveDate>,
}

/// 부채 수정 입력 (전체 교체).
///
/// 모든 필드가 필수입니다. `target_date`는 `null`로 비울 수 있지만 생략할 수는 없습니다.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DebtUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub total_amount: i64,
    #[validate(range(min = 0))]
    pub remaining_amount: i64,
    /// 상환 목표일 (YYYY-MM-DD 또는 null)
    #[serde(default, deserialize_with = "present")]
    #[validate(required(message = "target_date 필드가 필요합니다"))]
    #[schema(value_type = Option<NaiveDate>)]
    pub target_date: Option<Option<NaiveDate>>,
}

/// 값이 있으면(`null` 포함) `Some`으로 감쌉니다. 필드가 없으면 `default`가 `None`을 채웁니다.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 상환 입력. 금액은 양수여야 합니다.
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct PaymentInput {
    #[validate(range(min = 1))]
    pub amount: i64,
}

const SELECT_COLUMNS: &str =
    "id, user_id, name, total_amount, remaining_amount, target_date, created_at";

/// Debt Repository
pub struct DebtRepository;

impl DebtRepository {
    /// 소유자의 부채 목록 (id 순).
    pub async fn list(conn: &mut SqliteConnection, owner_id: i64) -> BudgetResult<Vec<Debt>> {
        let rows = sqlx::query_as::<_, Debt>(&format!(
            "SELECT {} FROM debts WHERE user_id = ?1 ORDER BY id",
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
    ) -> BudgetResult<Option<Debt>> {
        let row = sqlx::query_as::<_, Debt>(&format!(
            "SELECT {} FROM debts WHERE id = ?1 AND user_id = ?2",
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

        Ok(row)
    }

    /// 생성.
    pub async fn create(
        conn: &mut SqliteConnection,
        owner_id: i64,
        input: &DebtInput,
    ) -> BudgetResult<Debt> {
        let row = sqlx::query_as::<_, Debt>(&format!(
            r#"
            INSERT INTO debts (user_id, name, total_amount, remaining_amount, target_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(owner_id)
        .bind(&input.name)
        .bind(input.total_amount)
        .bind(input.remaining_amount.unwrap_or(input.total_amount))
        .bind(input.target_date)
        .fetch_one(conn)
        .await?;

        Ok(row)
    }

    /// 전체 필드 교체.
    pub async fn update(
        conn: &mut SqliteConnection,
        owner_id: i64,
        id: i64,
        input: &DebtUpdate,
    ) -> BudgetResult<Debt> {
        sqlx::query_as::<_, Debt>(&format!(
            r#"
            UPDATE debts
            SET name = ?3, total_amount = ?4, remaining_amount = ?5, target_date = ?6
            WHERE id = ?1 AND user_id = ?2
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(input.total_amount)
        .bind(input.remaining_amount)
        .bind(input.target_date.flatten())
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| BudgetError::not_found("debt", id))
    }

    /// 삭제. 대상이 없으면 false.
    pub async fn delete(conn: &mut SqliteConnection, owner_id: i64, id: i64) -> BudgetResult<bool> {
        let result = sqlx::query("DELETE FROM debts WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(owner_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 상환. 남은 금액은 0 아래로 내려가지 않습니다.
    pub async fn pay(
        conn: &mut SqliteConnection,
        owner_id: i64,
        id: i64,
        amount: i64,
    ) -> BudgetResult<Debt> {
        if amount <= 0 {
            return Err(BudgetError::Validation("상환 금액은 0보다 커야 합니다".to_string()));
        }

        let debt = Self::find(&mut *conn, owner_id, id)
            .await?
            .ok_or_else(|| BudgetError::not_found("debt", id))?;

        let row = sqlx::query_as::<_, Debt>(&format!(
            "UPDATE debts SET remaining_amount = ?3 WHERE id = ?1 AND user_id = ?2 RETURNING {}",
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .bind(apply_payment(debt.remaining_amount, amount))
        .fetch_one(conn)
        .await?;

        Ok(row)
    }
}
